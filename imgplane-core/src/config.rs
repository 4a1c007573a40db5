//! Overlay configuration

/// Camera placement and clip planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Distance from the scene origin along +Z. At this distance one scene
    /// unit covers one CSS pixel.
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraConfig {
    /// Camera at `distance` with clip planes at half and ten times that
    /// distance, so the z = 0 image planes always sit inside the frustum.
    pub fn at_distance(distance: f32) -> Self {
        Self {
            distance,
            near: distance / 2.0,
            far: distance * 10.0,
        }
    }

    /// Whether the plane z = 0 lies strictly between the clip planes.
    pub fn frames_origin(&self) -> bool {
        self.near > 0.0 && self.near < self.distance && self.distance < self.far
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::at_distance(200.0)
    }
}

/// How image textures are bound to mesh materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureBinding {
    /// Every mesh owns a material sampling its own image.
    #[default]
    PerImage,
    /// One material for all meshes, sampling the first image only.
    Shared,
}

/// Everything the overlay needs to know before it mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Selector for the source `<img>` elements, queried once.
    pub image_selector: String,
    /// Selector for the element that receives the canvas and defines the viewport.
    pub container_selector: String,
    pub camera: CameraConfig,
    pub texture_binding: TextureBinding,
    /// Also resync mesh positions on scroll, not only on resize.
    pub sync_on_scroll: bool,
    /// Canvas backing-store scale. `None` follows `window.devicePixelRatio`.
    pub pixel_ratio: Option<f64>,
    pub antialias: bool,
    pub alpha: bool,
    pub log_level: log::LevelFilter,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            image_selector: ".images img".to_string(),
            container_selector: ".canvas".to_string(),
            camera: CameraConfig::default(),
            texture_binding: TextureBinding::default(),
            sync_on_scroll: false,
            pixel_ratio: None,
            antialias: true,
            alpha: true,
            log_level: log::LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.image_selector, ".images img");
        assert_eq!(config.container_selector, ".canvas");
        assert_eq!(config.camera.distance, 200.0);
        assert_eq!(config.texture_binding, TextureBinding::PerImage);
        assert!(!config.sync_on_scroll);
    }

    #[test]
    fn test_default_clip_planes() {
        let camera = CameraConfig::default();
        assert_eq!(camera.near, 100.0);
        assert_eq!(camera.far, 2000.0);
    }

    #[test]
    fn test_clip_planes_follow_distance() {
        let close = CameraConfig::at_distance(50.0);
        assert_eq!((close.near, close.far), (25.0, 500.0));
        assert!(close.frames_origin());

        let far = CameraConfig::at_distance(5000.0);
        assert!(far.frames_origin());

        let clipped = CameraConfig {
            distance: 50.0,
            ..CameraConfig::default()
        };
        assert!(!clipped.frames_origin());
    }
}
