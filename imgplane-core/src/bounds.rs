//! Element bounding boxes in page pixel coordinates

/// An element's on-screen rectangle, as reported by `getBoundingClientRect`.
///
/// `top`/`left` grow downward/rightward from the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether the two boxes differ in size, ignoring position.
    pub fn size_differs(&self, other: &Bounds) -> bool {
        (self.width - other.width).abs() > f32::EPSILON
            || (self.height - other.height).abs() > f32::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let bounds = Bounds::new(50.0, 100.0, 200.0, 150.0);
        assert_eq!(bounds.right(), 300.0);
        assert_eq!(bounds.bottom(), 200.0);
    }

    #[test]
    fn test_size_differs_ignores_position() {
        let a = Bounds::new(0.0, 0.0, 10.0, 20.0);
        let moved = Bounds::new(40.0, 30.0, 10.0, 20.0);
        let grown = Bounds::new(0.0, 0.0, 12.0, 20.0);
        assert!(!a.size_differs(&moved));
        assert!(a.size_differs(&grown));
    }
}
