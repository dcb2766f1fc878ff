//! Configuration for the dotfield animation.
//!
//! A dotfield config is a small versioned TOML document with two tables:
//! `[motion]` tunes the control loop (clock speed, trajectory cycle rate,
//! easing control points, blend smoothing) and `[style]` tunes presentation
//! (glow radius, dot count, brightness cap, colors). Every field has a
//! default, so an empty document — or no file at all — yields a usable
//! configuration. The tuning values deliberately live here rather than as
//! constants in the animation crate: they encode aesthetic choice, not
//! correctness.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DotfieldConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Control-loop tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Integrated-time units accumulated per millisecond of wall clock.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Trajectory cycles per integrated-time unit.
    #[serde(default = "default_cycle_rate")]
    pub cycle_rate: f64,
    /// Fraction of the remaining distance the focal point covers each frame.
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    /// Symmetric cubic easing control points in `[0, 1]`.
    #[serde(default = "default_ease")]
    pub ease: [f32; 2],
    /// Start with the animation clock frozen.
    #[serde(default)]
    pub paused: bool,
}

/// Presentation tuning consumed by the uniform packager and shader.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleConfig {
    /// Glow radius around the focal point, in pixels.
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Dots per canvas-width row; non-positive values fall back to a default
    /// at packaging time rather than erroring here.
    #[serde(default = "default_num_dots")]
    pub num_dots: f32,
    /// Brightness cap applied to the falloff, usually in `[0, 1]`.
    #[serde(default = "default_max_brightness")]
    pub max_brightness: f32,
    /// Dot color.
    #[serde(
        default = "default_color",
        deserialize_with = "deserialize_color",
        serialize_with = "serialize_color"
    )]
    pub color: [f32; 4],
    /// Background color.
    #[serde(
        default = "default_bg_color",
        deserialize_with = "deserialize_color",
        serialize_with = "serialize_color"
    )]
    pub bg_color: [f32; 4],
}

fn default_version() -> u32 {
    1
}

fn default_speed() -> f64 {
    0.0005
}

fn default_cycle_rate() -> f64 {
    0.05
}

fn default_smoothing() -> f32 {
    0.1
}

fn default_ease() -> [f32; 2] {
    [0.2, 0.8]
}

fn default_radius() -> f32 {
    60.0
}

fn default_num_dots() -> f32 {
    24.0
}

fn default_max_brightness() -> f32 {
    1.0
}

fn default_color() -> [f32; 4] {
    [1.0, 0.824, 0.498, 1.0]
}

fn default_bg_color() -> [f32; 4] {
    [0.063, 0.063, 0.102, 1.0]
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            cycle_rate: default_cycle_rate(),
            smoothing: default_smoothing(),
            ease: default_ease(),
            paused: false,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            num_dots: default_num_dots(),
            max_brightness: default_max_brightness(),
            color: default_color(),
            bg_color: default_bg_color(),
        }
    }
}

impl Default for DotfieldConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            motion: MotionConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl DotfieldConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: DotfieldConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        let motion = &self.motion;
        if !motion.speed.is_finite() || motion.speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "motion.speed must be a non-negative finite number, got {}",
                motion.speed
            )));
        }
        if !motion.cycle_rate.is_finite() || motion.cycle_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "motion.cycle_rate must be greater than zero, got {}",
                motion.cycle_rate
            )));
        }
        if !(motion.smoothing > 0.0 && motion.smoothing < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "motion.smoothing must lie strictly between 0 and 1, got {}",
                motion.smoothing
            )));
        }
        for (index, point) in motion.ease.iter().enumerate() {
            if !(0.0..=1.0).contains(point) {
                return Err(ConfigError::Invalid(format!(
                    "motion.ease[{index}] must lie in [0, 1], got {point}"
                )));
            }
        }

        let style = &self.style;
        // A zero radius would collapse the shader's smoothstep falloff edges.
        if !style.radius.is_finite() || style.radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "style.radius must be positive, got {}",
                style.radius
            )));
        }
        if !style.max_brightness.is_finite() || style.max_brightness < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "style.max_brightness must be non-negative, got {}",
                style.max_brightness
            )));
        }

        Ok(())
    }
}

/// Parses a `#rgb`, `#rrggbb`, or `#rrggbbaa` hex string into linear RGBA.
pub fn parse_color(raw: &str) -> Result<[f32; 4], String> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix('#')
        .ok_or_else(|| format!("color '{trimmed}' must start with '#'"))?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("color '{trimmed}' contains non-hex characters"));
    }

    let channel = |pair: &str| -> Result<f32, String> {
        u8::from_str_radix(pair, 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|err| format!("invalid color component '{pair}': {err}"))
    };

    match hex.len() {
        3 => {
            let mut out = [0.0_f32; 4];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                let doubled: String = [c, c].iter().collect();
                *slot = channel(&doubled)?;
            }
            out[3] = 1.0;
            Ok(out)
        }
        6 | 8 => {
            let mut out = [0.0_f32, 0.0, 0.0, 1.0];
            for (index, slot) in out.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = channel(&hex[index * 2..index * 2 + 2])?;
            }
            Ok(out)
        }
        other => Err(format!(
            "color '{trimmed}' has {other} hex digits; expected 3, 6, or 8"
        )),
    }
}

fn format_color(color: [f32; 4]) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    if (color[3] - 1.0).abs() < f32::EPSILON {
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(color[0]),
            byte(color[1]),
            byte(color[2])
        )
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(color[0]),
            byte(color[1]),
            byte(color[2]),
            byte(color[3])
        )
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<[f32; 4], D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = [f32; 4];

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a hex color string like '#rrggbb' or '#rrggbbaa'")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_color(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_str(Visitor)
}

fn serialize_color<S>(color: &[f32; 4], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_color(*color))
}
