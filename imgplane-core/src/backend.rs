//! Seams to the host page and the graphics backend
use crate::bounds::Bounds;
use crate::projection::Camera;
use crate::scene::{Scene, TextureId};
use crate::viewport::Viewport;

/// A source image laid out by the page. Read-only.
pub trait ImageElement {
    /// Current rendered bounding box
    fn bounds(&self) -> Bounds;

    /// URL the image was loaded from
    fn source(&self) -> String;
}

/// Creates textures from image URLs.
///
/// `load` returns at once. The texture may show a placeholder until the
/// image has decoded, and keeps it if decoding fails.
pub trait TextureLoader {
    fn load(&mut self, source: &str) -> TextureId;
}

/// Draws a scene through a camera onto the overlay surface.
pub trait Renderer {
    type Error;

    /// Resize the drawing surface
    fn set_size(&mut self, viewport: Viewport);

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}
