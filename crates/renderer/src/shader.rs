//! First-party GLSL shaders compiled through wgpu's naga GLSL frontend.

use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Compiles the static full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fullscreen triangle vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Compiles the dot-grid fragment shader.
pub(crate) fn compile_fragment_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("dotfield fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(FRAGMENT_SHADER_GLSL),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos, 0.0, 1.0);
}
";

/// Per-pixel dot-grid brightness field.
///
/// The uniform block layout must match `DotUniforms` in `uniforms.rs`
/// (std140). Each pixel resolves the center of its dot cell, measures the
/// cell's distance to the focal position, maps that through an inverted
/// smoothstep falloff into a brightness, sizes the dot accordingly, and
/// blends foreground over background along an antialiased signed-distance
/// edge. The dot-count guard mirrors the CPU-side packager so a stale or
/// hand-written uniform buffer can never divide by zero.
const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform DotParams {
    vec2 uCirclePos;
    float uCircleRadius;
    float uClock;
    float uCanvasWidth;
    float uNumDots;
    float uMaxBrightness;
    float uPad0;
    vec4 uColor;
    vec4 uBgColor;
};

void main() {
    float numDots = uNumDots > 0.0 ? uNumDots : 24.0;
    float pitch = uCanvasWidth / numDots;

    vec2 pos = gl_FragCoord.xy;
    vec2 cellCenter = (floor(pos / pitch) + 0.5) * pitch;

    float focusDistance = distance(cellCenter, uCirclePos);
    float brightness =
        (1.0 - smoothstep(uCircleRadius * 0.5, uCircleRadius, focusDistance)) * uMaxBrightness;

    float halfSize = brightness * pitch * 0.5;
    float signedDistance = length(pos - cellCenter) - halfSize;
    float alpha = 1.0 - smoothstep(-1.0, 1.0, signedDistance);

    outColor = mix(uBgColor, uColor, alpha);
}
";
