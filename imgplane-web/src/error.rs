//! Errors raised while mounting or drawing the overlay
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element matches `{0}`")]
    MissingElement(String),

    #[error("WebGL2 is not supported by this browser")]
    WebGl2Unsupported,

    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("failed to link shader program: {0}")]
    ProgramLink(String),

    #[error("shader program has no attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("failed to create {0}")]
    Allocation(&'static str),

    #[error("camera distance must be a positive finite number, got {0}")]
    CameraDistance(f32),

    #[error("unknown log level `{0}`")]
    LogLevel(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(error: WebError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = WebError::MissingElement(".canvas".to_string());
        assert_eq!(err.to_string(), "no element matches `.canvas`");

        let err = WebError::ShaderCompile {
            stage: "vertex",
            log: "ERROR: 0:1".to_string(),
        };
        assert_eq!(err.to_string(), "failed to compile vertex shader: ERROR: 0:1");
    }
}
