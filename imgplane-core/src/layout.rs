//! DOM layout to scene coordinates
//!
//! Screen space has its origin at the viewport's top-left with Y growing
//! downward. The scene has its origin at the viewport centre with Y growing
//! upward, and (given the camera from [`crate::projection`]) one unit per pixel.
use nalgebra::Point2;

use crate::bounds::Bounds;
use crate::viewport::Viewport;

/// Scene-space centre of a mesh that overlays `bounds` exactly.
pub fn mesh_center(bounds: &Bounds, viewport: Viewport) -> Point2<f32> {
    let x = bounds.left - viewport.half_width() + bounds.width / 2.0;
    let y = -bounds.top + viewport.half_height() - bounds.height / 2.0;
    Point2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_image_scenario() {
        let bounds = Bounds::new(50.0, 100.0, 200.0, 150.0);
        let center = mesh_center(&bounds, Viewport::new(800, 600));
        assert_eq!(center, Point2::new(-200.0, 175.0));
    }

    #[test]
    fn test_full_viewport_image_is_centred() {
        let bounds = Bounds::new(0.0, 0.0, 800.0, 600.0);
        let center = mesh_center(&bounds, Viewport::new(800, 600));
        assert_eq!(center, Point2::origin());
    }

    #[test]
    fn test_scrolled_past_image_goes_above_viewport() {
        // Negative top means the image has scrolled off the top edge.
        let bounds = Bounds::new(-400.0, 0.0, 100.0, 100.0);
        let center = mesh_center(&bounds, Viewport::new(800, 600));
        assert_eq!(center, Point2::new(-350.0, 650.0));
    }
}
