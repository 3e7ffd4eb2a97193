// Immediate-mode 2D drawing surface the game draws into

use glam::{Vec2, Vec4};

use crate::core::math::Rect;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_SLATE_GRAY: Color = Color::rgb(47, 79, 79);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as stored, scaled to 0..1
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        )
    }

    /// Shader color for a render target. An sRGB target encodes on write,
    /// so it is fed linear values; any other target gets the values as is.
    pub fn for_target(self, srgb_target: bool) -> Vec4 {
        if srgb_target {
            self.to_linear()
        } else {
            self.to_vec4()
        }
    }

    /// Linear RGBA for an sRGB render target
    pub fn to_linear(self) -> Vec4 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Vec4::new(channel(self.r), channel(self.g), channel(self.b), 1.0)
    }
}

/// Drawing operations available to the game.
///
/// Images are referred to by identifier only; resolving them to pixels is
/// the implementor's business.
pub trait Canvas {
    /// Discard everything drawn so far this frame
    fn clear(&mut self);

    /// Cover the whole surface with one color
    fn fill(&mut self, color: Color);

    fn filled_rect(&mut self, rect: Rect, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draw text centered on `center`; `size` is the glyph height in pixels
    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color);

    /// Draw an image with its top-left corner at `top_left`
    fn blit(&mut self, image: &str, top_left: Vec2);

    /// Draw an image centered on `center`
    fn actor(&mut self, image: &str, center: Vec2);

    /// Outline of a rectangle
    fn rect(&mut self, rect: Rect, color: Color) {
        let top_left = Vec2::new(rect.left(), rect.top());
        let top_right = Vec2::new(rect.right(), rect.top());
        let bottom_right = Vec2::new(rect.right(), rect.bottom());
        let bottom_left = Vec2::new(rect.left(), rect.bottom());
        self.line(top_left, top_right, color);
        self.line(top_right, bottom_right, color);
        self.line(bottom_right, bottom_left, color);
        self.line(bottom_left, top_left, color);
    }
}
