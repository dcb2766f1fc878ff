//! CPU-side mirror of the shader's uniform block.

use animation::FrameUniforms;
use bytemuck::{Pod, Zeroable};

/// std140 layout of the GLSL `DotParams` block in `shader.rs`.
///
/// The vec2 opens the block at offset 0, the six scalars pack into the next
/// 24 bytes (one of them explicit padding to reach vec4 alignment), and the
/// two colors close it out at offsets 32 and 48 — 64 bytes total. Any layout
/// drift between this struct and the GLSL block corrupts every field after
/// the drift point, which is why the tests below pin size and offsets.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DotUniforms {
    pub circle_pos: [f32; 2],
    pub circle_radius: f32,
    pub clock: f32,
    pub canvas_width: f32,
    pub num_dots: f32,
    pub max_brightness: f32,
    pub _pad0: f32,
    pub color: [f32; 4],
    pub bg_color: [f32; 4],
}

unsafe impl Zeroable for DotUniforms {}
unsafe impl Pod for DotUniforms {}

impl DotUniforms {
    /// Mirrors one frame's packaged snapshot into the GPU layout.
    pub fn from_frame(frame: &FrameUniforms) -> Self {
        Self {
            circle_pos: frame.circle_pos,
            circle_radius: frame.circle_radius,
            clock: frame.clock,
            canvas_width: frame.canvas_width,
            num_dots: frame.num_dots,
            max_brightness: frame.max_brightness,
            _pad0: 0.0,
            color: frame.color,
            bg_color: frame.bg_color,
        }
    }
}
