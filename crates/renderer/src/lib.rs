//! Renderer crate for dotfield.
//!
//! Glues the winit preview window, the `wgpu` rendering pipeline, and the
//! dot-grid shader together. The overall flow is:
//!
//! ```text
//!   CLI / dotfield
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//!          ▲                │                   │
//!          │         pointer events ─▶ FrameEngine::tick ─▶ GPU UBO
//! ```
//!
//! `WindowState` owns the GPU resources and the [`animation::FrameEngine`];
//! each `RedrawRequested` event runs one engine tick and uploads the
//! resulting uniform snapshot before drawing a fullscreen triangle.

mod gpu;
mod shader;
mod uniforms;
mod window;

use anyhow::Result;
use dotconfig::{MotionConfig, StyleConfig};

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Optional FPS cap; None = render every frame callback.
    pub target_fps: Option<f32>,
    /// Control-loop tuning handed to the frame engine.
    pub motion: MotionConfig,
    /// Presentation tuning handed to the frame engine.
    pub style: StyleConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (800, 600),
            target_fps: None,
            motion: MotionConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives inside the window module; `Renderer` simply
/// forwards the request into the event loop.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the `winit` event loop until it closes.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
