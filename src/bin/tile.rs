//! Tile grid overlay.
//!
//! Writes `<name>_tiled<W>x<H>.<ext>` beside the input: a copy of the image
//! with white lines on every tile boundary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_sprite::assets;

#[derive(Debug, Parser)]
#[command(name = "tui-sprite-tile", version, about = "Draw a tile grid over an image")]
struct Args {
    /// Image to tile
    image: PathBuf,
    /// Tile width in pixels
    width: u32,
    /// Tile height in pixels
    height: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let target = assets::tile(&args.image, args.width, args.height)?;
    info!(target = %target.display(), "written");
    Ok(())
}
