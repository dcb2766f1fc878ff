use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dotfield",
    author,
    version,
    about = "Animated dot-grid glow driven by a wandering focal point",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Path to a dotfield TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Window size (e.g. `800x600`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface_size)]
    pub size: Option<(u32, u32)>,

    /// Clock speed in integrated-time units per millisecond.
    #[arg(long, value_name = "SPEED")]
    pub speed: Option<f64>,

    /// Dots per canvas-width row.
    #[arg(long, value_name = "COUNT")]
    pub dots: Option<f32>,

    /// Glow radius around the focal point, in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub radius: Option<f32>,

    /// Dot color as `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    #[arg(long, value_name = "COLOR", value_parser = parse_color_arg)]
    pub color: Option<[f32; 4]>,

    /// Background color.
    #[arg(long, value_name = "COLOR", value_parser = parse_color_arg)]
    pub bg_color: Option<[f32; 4]>,

    /// Optional FPS cap (0 = uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Start with the animation clock paused (Space toggles at runtime).
    #[arg(long)]
    pub paused: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_surface_size(raw: &str) -> Result<(u32, u32), String> {
    let (width_raw, height_raw) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("size '{raw}' must look like WIDTHxHEIGHT"))?;
    let width: u32 = width_raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid width '{width_raw}': {err}"))?;
    let height: u32 = height_raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid height '{height_raw}': {err}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{raw}' must have non-zero dimensions"));
    }
    Ok((width, height))
}

fn parse_color_arg(raw: &str) -> Result<[f32; 4], String> {
    dotconfig::parse_color(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_surface_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size("300X600").unwrap(), (300, 600));
        assert_eq!(parse_surface_size(" 1920 x 1080 ".trim()).unwrap(), (1920, 1080));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800x").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("axb").is_err());
    }

    #[test]
    fn color_arg_accepts_hex_forms() {
        assert_eq!(parse_color_arg("#fff").unwrap(), [1.0, 1.0, 1.0, 1.0]);
        assert!(parse_color_arg("red").is_err());
    }
}
