//! Camera and projection utilities
use nalgebra::{Matrix4, Point2, Point3, Vector3};

use crate::config::CameraConfig;
use crate::transform::Transform;
use crate::viewport::Viewport;

/// Vertical field of view (radians) that makes one scene unit at `distance`
/// cover one pixel of a viewport `height` pixels tall.
pub fn pixel_perfect_fov(height: u32, distance: f32) -> f32 {
    2.0 * (height as f32 / 2.0 / distance).atan()
}

/// Perspective camera on the +Z axis looking at the scene origin
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Place a camera so the plane z = 0 maps 1:1 onto `viewport` pixels.
    pub fn for_viewport(viewport: Viewport, config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, config.distance),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: 0.0,
            aspect: 1.0,
            near: config.near,
            far: config.far,
        };
        camera.fit_viewport(viewport);
        camera
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Recompute field of view and aspect for a resized viewport.
    ///
    /// The projection matrix is derived from these on every call to
    /// [`Camera::projection_matrix`], so nothing else needs refreshing.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        self.fov = pixel_perfect_fov(viewport.height, self.distance());
        self.aspect = viewport.aspect();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space (top-left origin, pixels).
    ///
    /// Returns `None` when the point lands behind the camera or outside the
    /// depth range.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        viewport: Viewport,
    ) -> Option<Point2<f32>> {
        let mvp = Transform::mvp_matrix(
            model_matrix,
            &self.view_matrix(),
            &self.projection_matrix(),
        );
        let ndc = mvp.transform_point(point);

        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * viewport.width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * viewport.height as f32;

        Some(Point2::new(screen_x, screen_y))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_viewport(Viewport::new(800, 600), &CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::for_viewport(Viewport::new(800, 600), &CameraConfig::default());
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 200.0));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.near, 100.0);
        assert_eq!(camera.far, 2000.0);
    }

    #[test]
    fn test_fov_depends_on_height_only() {
        let mut camera = Camera::default();
        camera.fit_viewport(Viewport::new(1024, 768));
        let expected = 2.0 * (768.0f32 / 2.0 / 200.0).atan();
        assert!((camera.fov - expected).abs() < 1e-6);

        camera.fit_viewport(Viewport::new(320, 768));
        assert!((camera.fov - expected).abs() < 1e-6);
        assert!((camera.aspect - 320.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let viewport = Viewport::new(800, 600);
        let camera = Camera::for_viewport(viewport, &CameraConfig::default());
        let screen = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), viewport)
            .unwrap();
        assert!((screen.x - 400.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_one_unit_is_one_pixel() {
        let viewport = Viewport::new(800, 600);
        let camera = Camera::for_viewport(viewport, &CameraConfig::default());
        let screen = camera
            .project_to_screen(&Point3::new(100.0, 50.0, 0.0), &Matrix4::identity(), viewport)
            .unwrap();
        assert!((screen.x - 500.0).abs() < 1e-2);
        assert!((screen.y - 250.0).abs() < 1e-2);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let viewport = Viewport::new(800, 600);
        let camera = Camera::for_viewport(viewport, &CameraConfig::default());
        let behind = Point3::new(0.0, 0.0, 400.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), viewport)
            .is_none());
    }
}
