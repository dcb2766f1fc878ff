mod cli;

use anyhow::{Context, Result};
use dotconfig::DotfieldConfig;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::parse();
    initialise_tracing();

    let mut config = match cli.config.as_deref() {
        Some(path) => DotfieldConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DotfieldConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("configuration rejected")?;

    let surface_size = cli.size.unwrap_or((800, 600));
    let target_fps = cli.fps.and_then(|fps| if fps > 0.0 { Some(fps) } else { None });

    tracing::info!(
        width = surface_size.0,
        height = surface_size.1,
        speed = config.motion.speed,
        num_dots = config.style.num_dots,
        paused = config.motion.paused,
        "starting dotfield"
    );

    Renderer::new(RendererConfig {
        surface_size,
        target_fps,
        motion: config.motion,
        style: config.style,
    })
    .run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Command-line flags win over the config file, which wins over defaults.
fn apply_overrides(config: &mut DotfieldConfig, cli: &cli::Cli) {
    if let Some(speed) = cli.speed {
        config.motion.speed = speed;
    }
    if cli.paused {
        config.motion.paused = true;
    }
    if let Some(dots) = cli.dots {
        config.style.num_dots = dots;
    }
    if let Some(radius) = cli.radius {
        config.style.radius = radius;
    }
    if let Some(color) = cli.color {
        config.style.color = color;
    }
    if let Some(bg_color) = cli.bg_color {
        config.style.bg_color = bg_color;
    }
}
