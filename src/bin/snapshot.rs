use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use softras::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use softras::prelude::*;

/// Render the demo scene without a window and write it to a PNG file.
#[derive(Parser)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Number of animation frames to advance before the snapshot
    #[arg(long, default_value_t = 0)]
    frames: u32,

    /// Blend translucent colors over what is already drawn
    #[arg(long, default_value_t = false)]
    alpha: bool,

    /// Output file
    #[arg(long, default_value = "snapshot.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = RasterConfig::new(args.width, args.height).with_alpha_blending(args.alpha);
    let mut buffer = RasterBuffer::from_config(&config)?;
    let mut scene = DemoScene::new();

    for _ in 0..args.frames {
        scene.advance();
    }
    let stats = scene.render(&mut buffer)?;
    info!(
        "frame {}: {} rows filled, {} written, {} occluded, {} tied, {} rejected",
        scene.frame(),
        stats.rows,
        stats.pixels.written,
        stats.pixels.occluded,
        stats.pixels.tied,
        stats.pixels.rejected
    );

    buffer
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}
