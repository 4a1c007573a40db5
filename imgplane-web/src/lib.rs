//! imgplane web - WebGL2 overlay that mirrors page images as shader planes
//!
//! Each `<img>` matched by the image selector gets a textured plane drawn on
//! a canvas inside the container element, positioned to cover the image
//! exactly and kept aligned on resize.

use std::str::FromStr;

use imgplane_core::{CameraConfig, OverlayConfig, TextureBinding};
use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod dom;
pub mod error;
pub mod gl;
pub mod logging;
pub mod shader;
pub mod texture;

pub use app::{App, SharedApp};
pub use error::WebError;

/// Options for [`ImageOverlay`]; every setter is optional.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct OverlayOptions {
    config: OverlayConfig,
}

#[wasm_bindgen]
impl OverlayOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> OverlayOptions {
        Self::default()
    }

    #[wasm_bindgen(js_name = setImageSelector)]
    pub fn set_image_selector(&mut self, selector: String) {
        self.config.image_selector = selector;
    }

    #[wasm_bindgen(js_name = setContainerSelector)]
    pub fn set_container_selector(&mut self, selector: String) {
        self.config.container_selector = selector;
    }

    /// Clip planes move with the camera so the images stay in view.
    #[wasm_bindgen(js_name = setCameraDistance)]
    pub fn set_camera_distance(&mut self, distance: f32) -> Result<(), JsValue> {
        self.config.camera = camera_at(distance)?;
        Ok(())
    }

    /// Bind every plane to the first image's texture instead of its own.
    #[wasm_bindgen(js_name = setSharedTexture)]
    pub fn set_shared_texture(&mut self, shared: bool) {
        self.config.texture_binding = if shared {
            TextureBinding::Shared
        } else {
            TextureBinding::PerImage
        };
    }

    #[wasm_bindgen(js_name = setSyncOnScroll)]
    pub fn set_sync_on_scroll(&mut self, enabled: bool) {
        self.config.sync_on_scroll = enabled;
    }

    #[wasm_bindgen(js_name = setPixelRatio)]
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.config.pixel_ratio = Some(ratio);
    }

    #[wasm_bindgen(js_name = setAntialias)]
    pub fn set_antialias(&mut self, enabled: bool) {
        self.config.antialias = enabled;
    }

    #[wasm_bindgen(js_name = setAlpha)]
    pub fn set_alpha(&mut self, enabled: bool) {
        self.config.alpha = enabled;
    }

    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[wasm_bindgen(js_name = setLogLevel)]
    pub fn set_log_level(&mut self, level: &str) -> Result<(), JsValue> {
        self.config.log_level = parse_level(level)?;
        Ok(())
    }
}

fn camera_at(distance: f32) -> Result<CameraConfig, WebError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(CameraConfig::at_distance(distance))
    } else {
        Err(WebError::CameraDistance(distance))
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, WebError> {
    LevelFilter::from_str(level).map_err(|_| WebError::LogLevel(level.to_string()))
}

/// A mounted overlay
#[wasm_bindgen]
pub struct ImageOverlay {
    app: SharedApp,
}

#[wasm_bindgen]
impl ImageOverlay {
    /// Mount onto the page and start listening for resizes. Call
    /// [`ImageOverlay::start`] to begin animating.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<OverlayOptions>) -> Result<ImageOverlay, JsValue> {
        let config = options.map(|options| options.config).unwrap_or_default();
        let app = App::mount(config)?;
        app::install_listeners(&app)?;
        Ok(ImageOverlay { app })
    }

    /// Begin (or resume) the animation-frame loop
    pub fn start(&self) -> Result<(), JsValue> {
        app::start_animation(&self.app)?;
        Ok(())
    }

    pub fn stop(&self) {
        self.app.borrow_mut().stop();
    }

    /// Realign to the container's current size
    pub fn resize(&self) {
        self.app.borrow_mut().resize();
    }

    #[wasm_bindgen(js_name = meshCount)]
    pub fn mesh_count(&self) -> usize {
        self.app.borrow().mesh_count()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init_logging(logging::LoggingConfig::default());

    #[cfg(feature = "autostart")]
    autostart()?;

    Ok(())
}

/// Mount with default options when the page has the default container.
#[cfg(feature = "autostart")]
fn autostart() -> Result<(), WebError> {
    let config = OverlayConfig::default();
    let document = dom::document(&dom::window()?)?;
    if document.query_selector(&config.container_selector)?.is_none() {
        log::info!(
            "no `{}` element; waiting for an explicit ImageOverlay",
            config.container_selector
        );
        return Ok(());
    }

    let app = App::mount(config)?;
    app::install_listeners(&app)?;
    app::start_animation(&app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_map_onto_config() {
        let mut options = OverlayOptions::new();
        options.set_image_selector(".gallery img".to_string());
        options.set_shared_texture(true);
        options.set_sync_on_scroll(true);
        options.set_pixel_ratio(2.0);

        assert_eq!(options.config.image_selector, ".gallery img");
        assert_eq!(options.config.texture_binding, TextureBinding::Shared);
        assert!(options.config.sync_on_scroll);
        assert_eq!(options.config.pixel_ratio, Some(2.0));
        assert_eq!(options.config.container_selector, ".canvas");
    }

    #[test]
    fn test_camera_distance_moves_clip_planes() {
        let camera = camera_at(50.0).unwrap();
        assert_eq!(camera.distance, 50.0);
        assert!(camera.near < 50.0 && camera.far > 50.0);

        assert!(matches!(camera_at(0.0), Err(WebError::CameraDistance(_))));
        assert!(matches!(camera_at(-10.0), Err(WebError::CameraDistance(_))));
        assert!(matches!(camera_at(f32::NAN), Err(WebError::CameraDistance(_))));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert!(matches!(parse_level("loud"), Err(WebError::LogLevel(_))));
    }
}
