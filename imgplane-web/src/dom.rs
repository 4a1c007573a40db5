//! Page access: the container, the source images and their layout
use imgplane_core::{Bounds, ImageElement, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, Window};

use crate::error::WebError;

pub fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, WebError> {
    window.document().ok_or(WebError::NoDocument)
}

/// First element matching `selector`, as an `HtmlElement`.
pub fn query_html_element(document: &Document, selector: &str) -> Result<HtmlElement, WebError> {
    document
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| WebError::MissingElement(selector.to_string()))
}

/// Every `<img>` matching `selector`, in document order. Matches that are
/// not images are skipped.
pub fn query_images(document: &Document, selector: &str) -> Result<Vec<DomImage>, WebError> {
    let nodes = document.query_selector_all(selector)?;
    let mut images = Vec::with_capacity(nodes.length() as usize);

    for index in 0..nodes.length() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        match node.dyn_into::<HtmlImageElement>() {
            Ok(image) => images.push(DomImage::new(image)),
            Err(_) => log::warn!("`{selector}` matched a non-image element at index {index}"),
        }
    }

    log::debug!("`{selector}` matched {} images", images.len());
    Ok(images)
}

pub fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, WebError> {
    document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| WebError::Allocation("canvas element"))
}

/// Layout size of `element`, which defines the overlay viewport.
pub fn element_viewport(element: &HtmlElement) -> Viewport {
    viewport_from_offsets(element.offset_width(), element.offset_height())
}

fn viewport_from_offsets(width: i32, height: i32) -> Viewport {
    Viewport::new(width.max(0) as u32, height.max(0) as u32)
}

/// A source `<img>` on the page
#[derive(Debug, Clone)]
pub struct DomImage {
    element: HtmlImageElement,
}

impl DomImage {
    pub fn new(element: HtmlImageElement) -> Self {
        Self { element }
    }
}

impl ImageElement for DomImage {
    fn bounds(&self) -> Bounds {
        let rect = self.element.get_bounding_client_rect();
        Bounds::new(
            rect.top() as f32,
            rect.left() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn source(&self) -> String {
        // `currentSrc` reflects the candidate picked from `srcset`.
        let current = self.element.current_src();
        if current.is_empty() {
            self.element.src()
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_offsets_clamp_to_zero() {
        assert_eq!(viewport_from_offsets(-5, 600), Viewport::new(0, 600));
        assert_eq!(viewport_from_offsets(1280, 720), Viewport::new(1280, 720));
    }
}
