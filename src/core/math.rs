// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Axis-aligned rectangle in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            (self.width - 2.0 * margin).max(0.0),
            (self.height - 2.0 * margin).max(0.0),
        )
    }

    /// Edges are inclusive
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top() && y <= self.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.contains_x(point.x) && self.contains_y(point.y)
    }

    /// Nearest point inside the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, self.left(), self.right()),
            clamp(point.y, self.top(), self.bottom()),
        )
    }
}
