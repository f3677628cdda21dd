//! Renderer crate for quadview.
//!
//! Opens a window, draws one textured quad through a GLSL filter pipeline, and
//! lets the keyboard pick the filter and image while the mouse pans, rotates
//! and zooms the view. The overall flow is:
//!
//! ```text
//!   quadview (config + logging)
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop
//!                          │                 │ key / mouse / wheel
//!                          │                 ▼
//!                          │          InteractionState
//!                          ▼                 │ ShaderParameters
//!                      GpuState ◀────────────┘
//!                          │ FilterUniforms + quad vertices
//!                          ▼
//!                    render pass ─▶ present
//! ```
//!
//! [`InteractionState`] is plain data and does not need a GPU, which keeps the
//! filter, transform and image-switch rules testable on their own.

mod compile;
mod display;
mod geometry;
mod gpu;
pub mod interaction;
mod types;
mod window;

use anyhow::Result;

pub use display::{ImageDisplay, LoadedTexture, SwitchState};
pub use geometry::QuadGeometry;
pub use interaction::InteractionState;
pub use types::{ImageCatalog, ImageSlot, RendererConfig, ShaderSources, IMAGE_SLOT_COUNT};

/// Entry point that owns the start-up configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the viewer window and blocks until it is closed.
    ///
    /// Fails if the window, GPU device or shaders cannot be set up. A missing
    /// or undecodable image is not an error; it is logged and the previous
    /// image (or a blank placeholder) stays on screen.
    pub fn run(self) -> Result<()> {
        window::run_window(self.config)
    }
}
