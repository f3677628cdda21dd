//! GPU side of the viewer.
//!
//! - `context` owns the wgpu instance, device and surface, reconfigures the
//!   surface on resize, and wraps device calls in error scopes.
//! - `pipeline` compiles the two GLSL stages and builds the quad pipeline with
//!   its uniform (set 0) and texture (set 1) layouts.
//! - `texture` decodes image files and uploads them as sampled textures.
//! - `uniforms` mirrors the `FilterParams` block byte for byte.
//! - `state` glues these together behind `GpuState`, which the window loop
//!   drives once per frame.

mod context;
mod pipeline;
mod state;
mod texture;
mod uniforms;

pub(crate) use context::GpuContext;
pub(crate) use state::GpuState;
