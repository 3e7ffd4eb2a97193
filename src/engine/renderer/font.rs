// Built-in 5x7 bitmap font
//
// Each glyph is seven rows, top to bottom; bit 4 is the leftmost column.
// Lowercase letters render as uppercase.

use glam::Vec2;

use crate::core::math::Rect;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Columns from one glyph's left edge to the next
const ADVANCE: u32 = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT as usize];

#[rustfmt::skip]
const LETTERS: [Glyph; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

#[rustfmt::skip]
const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

#[rustfmt::skip]
const SLASH: Glyph = [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000];
#[rustfmt::skip]
const DASH: Glyph = [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000];
#[rustfmt::skip]
const PERIOD: Glyph = [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100];
#[rustfmt::skip]
const BANG: Glyph = [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100];
#[rustfmt::skip]
const COLON: Glyph = [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000];

/// Bitmap for a character; `None` renders as blank space
pub fn glyph(c: char) -> Option<&'static Glyph> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => LETTERS.get((c as u8 - b'A') as usize),
        c @ '0'..='9' => DIGITS.get((c as u8 - b'0') as usize),
        '/' => Some(&SLASH),
        '-' => Some(&DASH),
        '.' => Some(&PERIOD),
        '!' => Some(&BANG),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Size in pixels of one font cell for a requested text height
pub fn pixel_scale(size: f32) -> f32 {
    (size / GLYPH_HEIGHT as f32).floor().max(1.0)
}

/// Width and height of a line of text
pub fn measure(text: &str, scale: f32) -> Vec2 {
    let count = text.chars().count() as u32;
    let columns = (count * ADVANCE).saturating_sub(1);
    Vec2::new(columns as f32 * scale, GLYPH_HEIGHT as f32 * scale)
}

/// Lit pixels of a line of text as rectangles, one per horizontal run
pub fn layout(text: &str, top_left: Vec2, scale: f32) -> Vec<Rect> {
    let mut rects = Vec::new();
    for (index, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let origin_x = top_left.x + (index as u32 * ADVANCE) as f32 * scale;
        for (row, &bits) in rows.iter().enumerate() {
            let y = top_left.y + row as f32 * scale;
            let mut column = 0;
            while column < GLYPH_WIDTH {
                if bits & (1u8 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    column += 1;
                    continue;
                }
                let start = column;
                while column < GLYPH_WIDTH && bits & (1u8 << (GLYPH_WIDTH - 1 - column)) != 0 {
                    column += 1;
                }
                rects.push(Rect::new(
                    origin_x + start as f32 * scale,
                    y,
                    (column - start) as f32 * scale,
                    scale,
                ));
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('g'), glyph('G'));
        assert!(glyph('g').is_some());
    }

    #[test]
    fn test_unknown_is_blank() {
        assert!(glyph(' ').is_none());
        assert!(glyph('~').is_none());
    }

    #[test]
    fn test_pixel_scale() {
        assert_eq!(pixel_scale(56.0), 8.0);
        assert_eq!(pixel_scale(24.0), 3.0);
        assert_eq!(pixel_scale(3.0), 1.0);
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("", 2.0), Vec2::new(0.0, 14.0));
        assert_eq!(measure("A", 1.0), Vec2::new(5.0, 7.0));
        assert_eq!(measure("AB", 2.0), Vec2::new(22.0, 14.0));
    }

    #[test]
    fn test_menu_text_fits_its_button() {
        let width = measure("Music On/Off", pixel_scale(24.0)).x;
        assert!(width <= 220.0, "label is {width}px wide");
    }

    #[test]
    fn test_layout_merges_runs() {
        // Top row of 'T' is one five-pixel run, then one pixel per row
        let rects = layout("T", Vec2::ZERO, 1.0);
        assert_eq!(rects.len(), 7);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 5.0, 1.0));
        assert_eq!(rects[1], Rect::new(2.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_layout_advances_per_character() {
        let rects = layout(" -", Vec2::new(10.0, 20.0), 2.0);
        assert_eq!(rects, vec![Rect::new(22.0, 26.0, 10.0, 2.0)]);
    }
}
