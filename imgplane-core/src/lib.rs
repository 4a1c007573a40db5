//! imgplane core - keeps textured planes in lock-step with DOM image layout
//!
//! Platform-independent pieces of the overlay: viewport and camera math,
//! plane geometry, the scene, the layout synchronizer and the render loop.
//! Hosts plug in through the traits in [`backend`].

pub mod backend;
pub mod bounds;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod overlay;
pub mod projection;
pub mod render_loop;
pub mod scene;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use backend::{ImageElement, Renderer, TextureLoader};
pub use bounds::Bounds;
pub use clock::{FrameClock, FrameTime};
pub use config::{CameraConfig, OverlayConfig, TextureBinding};
pub use geometry::{PlaneGeometry, Vertex};
pub use overlay::{ImageRecord, Overlay};
pub use projection::Camera;
pub use render_loop::{run_frames, FrameStats, LoopControl, LoopState, RenderLoop, StopCondition};
pub use scene::{Material, MaterialId, Mesh, MeshId, Scene, TextureId, Uniforms};
pub use transform::Transform;
pub use viewport::Viewport;
