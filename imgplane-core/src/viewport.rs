//! Viewport dimensions in CSS pixels

/// Size of the drawing surface the overlay covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Not guarded: a zero height yields a non-finite value.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// True when either side is zero, i.e. nothing can be projected onto it.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height as f32 / 2.0
    }
}
