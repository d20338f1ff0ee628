//! Text image packer.
//!
//! Walks a directory tree and zips every directory that holds exactly
//! `glyphs.txt`, `foreground.png` and `background.png` into `<dir>.zip` next
//! to it.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_sprite::assets;

#[derive(Debug, Parser)]
#[command(name = "tui-sprite-pack", version, about = "Pack text image directories into archives")]
struct Args {
    /// Root directory to search for image directories
    dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }

    for archive in assets::pack_tree(&args.dir)? {
        info!(archive = %archive.display(), "written");
    }
    Ok(())
}
