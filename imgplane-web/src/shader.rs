//! Shader compilation and the image program's inputs
use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::error::WebError;

pub const VERTEX_SRC: &str = include_str!("../shaders/vertex.glsl");
pub const FRAGMENT_SRC: &str = include_str!("../shaders/fragment.glsl");

fn compile_shader(gl: &GL, src: &str, shader_type: u32) -> Result<WebGlShader, WebError> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or(WebError::Allocation("shader"))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    Err(WebError::ShaderCompile {
        stage: if shader_type == GL::VERTEX_SHADER {
            "vertex"
        } else {
            "fragment"
        },
        log,
    })
}

fn link_program(gl: &GL, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, WebError> {
    let vert = compile_shader(gl, vert_src, GL::VERTEX_SHADER)?;
    let frag = compile_shader(gl, frag_src, GL::FRAGMENT_SHADER)?;
    let program = gl
        .create_program()
        .ok_or(WebError::Allocation("shader program"))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);

    // Linked programs keep their own copy.
    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(WebError::ProgramLink(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}

fn attribute(gl: &GL, program: &WebGlProgram, name: &'static str) -> Result<u32, WebError> {
    u32::try_from(gl.get_attrib_location(program, name))
        .map_err(|_| WebError::MissingAttribute(name))
}

/// The linked image program with its attribute and uniform locations.
///
/// Uniforms the driver optimized out come back as `None`; setting them is a
/// no-op.
pub struct ImageProgram {
    pub program: WebGlProgram,
    pub a_position: u32,
    pub a_uv: u32,
    pub u_projection: Option<WebGlUniformLocation>,
    pub u_model_view: Option<WebGlUniformLocation>,
    pub u_time: Option<WebGlUniformLocation>,
    pub u_image: Option<WebGlUniformLocation>,
}

impl ImageProgram {
    pub fn new(gl: &GL) -> Result<Self, WebError> {
        let program = link_program(gl, VERTEX_SRC, FRAGMENT_SRC)?;

        Ok(Self {
            a_position: attribute(gl, &program, "aPosition")?,
            a_uv: attribute(gl, &program, "aUv")?,
            u_projection: gl.get_uniform_location(&program, "uProjection"),
            u_model_view: gl.get_uniform_location(&program, "uModelView"),
            u_time: gl.get_uniform_location(&program, "uTime"),
            u_image: gl.get_uniform_location(&program, "uImage"),
            program,
        })
    }
}
