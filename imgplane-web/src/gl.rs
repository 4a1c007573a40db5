//! WebGL2 renderer for the image planes
use std::collections::HashMap;

use imgplane_core::{Camera, Mesh, MeshId, OverlayConfig, Renderer, Scene, Transform, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlVertexArrayObject,
};

use crate::error::WebError;
use crate::shader::ImageProgram;
use crate::texture::TextureStore;

/// Floats per interleaved vertex: position (3) + uv (2)
const FLOATS_PER_VERTEX: i32 = 5;
const STRIDE: i32 = FLOATS_PER_VERTEX * 4;
const UV_OFFSET: i32 = 3 * 4;

/// Request a WebGL2 context honouring the overlay's antialias/alpha flags.
pub fn context(canvas: &HtmlCanvasElement, config: &OverlayConfig) -> Result<GL, WebError> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("antialias"),
        &JsValue::from_bool(config.antialias),
    )?;
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("alpha"),
        &JsValue::from_bool(config.alpha),
    )?;

    canvas
        .get_context_with_context_options("webgl2", &options)?
        .ok_or(WebError::WebGl2Unsupported)?
        .dyn_into::<GL>()
        .map_err(|_| WebError::WebGl2Unsupported)
}

/// Backing-store size for a viewport at the given device pixel ratio.
pub fn backing_size(viewport: Viewport, pixel_ratio: f64) -> (u32, u32) {
    let scale = |css: u32| (css as f64 * pixel_ratio).round().max(0.0) as u32;
    (scale(viewport.width), scale(viewport.height))
}

/// GPU copies of one mesh's plane
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
    geometry_version: u32,
}

pub struct WebGlRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: ImageProgram,
    textures: TextureStore,
    meshes: HashMap<MeshId, GpuMesh>,
    pixel_ratio: f64,
    clear_alpha: f32,
}

impl WebGlRenderer {
    pub fn new(
        canvas: HtmlCanvasElement,
        gl: GL,
        textures: TextureStore,
        config: &OverlayConfig,
        pixel_ratio: f64,
    ) -> Result<Self, WebError> {
        let program = ImageProgram::new(&gl)?;
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            gl,
            canvas,
            program,
            textures,
            meshes: HashMap::new(),
            pixel_ratio,
            clear_alpha: if config.alpha { 0.0 } else { 1.0 },
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn upload_mesh(&self, mesh: &Mesh) -> Result<GpuMesh, WebError> {
        let gl = &self.gl;

        let vao = gl
            .create_vertex_array()
            .ok_or(WebError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = gl
            .create_buffer()
            .ok_or(WebError::Allocation("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertex_buffer));
        let vertices = js_sys::Float32Array::from(mesh.geometry.interleaved().as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        gl.enable_vertex_attrib_array(self.program.a_position);
        gl.vertex_attrib_pointer_with_i32(self.program.a_position, 3, GL::FLOAT, false, STRIDE, 0);
        gl.enable_vertex_attrib_array(self.program.a_uv);
        gl.vertex_attrib_pointer_with_i32(
            self.program.a_uv,
            2,
            GL::FLOAT,
            false,
            STRIDE,
            UV_OFFSET,
        );

        let index_buffer = gl
            .create_buffer()
            .ok_or(WebError::Allocation("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        let indices = js_sys::Uint16Array::from(&mesh.geometry.indices[..]);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &indices, GL::STATIC_DRAW);

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vertex_buffer,
            index_buffer,
            index_count: mesh.geometry.indices.len() as i32,
            geometry_version: mesh.geometry_version,
        })
    }

    fn release_mesh(&self, gpu: GpuMesh) {
        self.gl.delete_vertex_array(Some(&gpu.vao));
        self.gl.delete_buffer(Some(&gpu.vertex_buffer));
        self.gl.delete_buffer(Some(&gpu.index_buffer));
    }

    /// Upload new meshes and re-upload ones whose geometry was replaced.
    fn sync_meshes(&mut self, scene: &Scene) -> Result<(), WebError> {
        for (id, mesh) in scene.meshes() {
            let current = self
                .meshes
                .get(&id)
                .map(|gpu| gpu.geometry_version == mesh.geometry_version);
            if current == Some(true) {
                continue;
            }

            let gpu = self.upload_mesh(mesh)?;
            if let Some(stale) = self.meshes.insert(id, gpu) {
                self.release_mesh(stale);
            }
        }
        Ok(())
    }
}

impl Renderer for WebGlRenderer {
    type Error = WebError;

    fn set_size(&mut self, viewport: Viewport) {
        let (width, height) = backing_size(viewport, self.pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let css = style
            .set_property("width", &format!("{}px", viewport.width))
            .and_then(|()| style.set_property("height", &format!("{}px", viewport.height)));
        if let Err(err) = css {
            log::warn!("failed to size canvas: {:?}", err);
        }

        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), WebError> {
        self.sync_meshes(scene)?;

        let gl = &self.gl;
        let program = &self.program;

        gl.clear_color(0.0, 0.0, 0.0, self.clear_alpha);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&program.program));

        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        gl.uniform_matrix4fv_with_f32_array(
            program.u_projection.as_ref(),
            false,
            projection.as_slice(),
        );
        gl.active_texture(GL::TEXTURE0);
        gl.uniform1i(program.u_image.as_ref(), 0);

        for (id, mesh) in scene.meshes() {
            let (Some(gpu), Some(material)) = (self.meshes.get(&id), scene.material(mesh.material))
            else {
                continue;
            };

            if material.transparent {
                gl.enable(GL::BLEND);
            } else {
                gl.disable(GL::BLEND);
            }

            let model_view = Transform::model_view_matrix(&mesh.model_matrix(), &view);
            gl.uniform_matrix4fv_with_f32_array(
                program.u_model_view.as_ref(),
                false,
                model_view.as_slice(),
            );
            gl.uniform1f(program.u_time.as_ref(), material.uniforms.time);
            gl.bind_texture(
                GL::TEXTURE_2D,
                self.textures.get(material.uniforms.image).as_ref(),
            );

            gl.bind_vertex_array(Some(&gpu.vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, gpu.index_count, GL::UNSIGNED_SHORT, 0);
        }

        gl.bind_vertex_array(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_by_pixel_ratio() {
        assert_eq!(backing_size(Viewport::new(800, 600), 1.0), (800, 600));
        assert_eq!(backing_size(Viewport::new(800, 600), 2.0), (1600, 1200));
        assert_eq!(backing_size(Viewport::new(333, 101), 1.5), (500, 152));
    }
}
