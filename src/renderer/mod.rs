//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.
//! Score and overlay text are HUD DOM elements owned by the entry point.

pub mod scene;
pub mod sdf_pipeline;

pub use scene::{MAX_OBSTACLES, Scene};
pub use sdf_pipeline::SdfRenderState;
