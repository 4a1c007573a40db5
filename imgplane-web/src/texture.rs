//! Image textures: created at once with a placeholder, filled in on load
use std::cell::RefCell;
use std::rc::Rc;

use imgplane_core::{TextureId, TextureLoader};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::WebError;

/// Fully transparent, shown until the image decodes (or forever, if it fails)
const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 0, 0];

/// Textures shared between the loader that fills them and the renderer that
/// samples them. Slots that failed to allocate hold `None`.
#[derive(Clone, Default)]
pub struct TextureStore {
    textures: Rc<RefCell<Vec<Option<WebGlTexture>>>>,
}

impl TextureStore {
    fn insert(&self, texture: Option<WebGlTexture>) -> TextureId {
        let mut textures = self.textures.borrow_mut();
        textures.push(texture);
        TextureId(textures.len() - 1)
    }

    pub fn get(&self, id: TextureId) -> Option<WebGlTexture> {
        self.textures.borrow().get(id.0).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.textures.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct WebTextureLoader {
    gl: GL,
    store: TextureStore,
}

impl WebTextureLoader {
    pub fn new(gl: GL, store: TextureStore) -> Self {
        Self { gl, store }
    }

    fn create_placeholder(&self) -> Result<WebGlTexture, WebError> {
        let texture = self
            .gl
            .create_texture()
            .ok_or(WebError::Allocation("texture"))?;
        self.gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        self.gl
            .tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                1,
                1,
                0,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                Some(&PLACEHOLDER_PIXEL[..]),
            )?;
        set_sampling(&self.gl);
        Ok(texture)
    }

    /// Start decoding `source` into `texture`. Returns before the image loads.
    fn begin_load(&self, texture: &WebGlTexture, source: &str) -> Result<(), WebError> {
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));

        let onload = {
            let gl = self.gl.clone();
            let texture = texture.clone();
            let image = image.clone();
            let source = source.to_string();
            Closure::wrap(Box::new(move || match upload(&gl, &texture, &image) {
                Ok(()) => log::debug!(
                    "uploaded {} ({}x{})",
                    source,
                    image.natural_width(),
                    image.natural_height()
                ),
                Err(err) => log::warn!("failed to upload {source}: {err}"),
            }) as Box<dyn FnMut()>)
        };

        let onerror = {
            let source = source.to_string();
            Closure::wrap(Box::new(move || {
                log::warn!("failed to load {source}; keeping placeholder");
            }) as Box<dyn FnMut()>)
        };

        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        image.set_src(source);
        Ok(())
    }

    fn try_load(&self, source: &str) -> Result<WebGlTexture, WebError> {
        let texture = self.create_placeholder()?;
        self.begin_load(&texture, source)?;
        Ok(texture)
    }
}

impl TextureLoader for WebTextureLoader {
    fn load(&mut self, source: &str) -> TextureId {
        let texture = match self.try_load(source) {
            Ok(texture) => Some(texture),
            Err(err) => {
                log::warn!("texture for {source} unavailable: {err}");
                None
            }
        };
        self.store.insert(texture)
    }
}

fn upload(gl: &GL, texture: &WebGlTexture, image: &HtmlImageElement) -> Result<(), WebError> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    // Image rows start at the top; texture v = 0 is the bottom of the plane.
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    let result = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    );
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
    result?;
    set_sampling(gl);
    Ok(())
}

/// Linear filtering without mipmaps, clamped at the edges (any image size).
fn set_sampling(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}
