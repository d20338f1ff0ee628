//! Asset loading for glyph images, animations and sprites.
//!
//! # Image format
//!
//! A text image is three entries, either files in a directory or entries in a
//! zip archive:
//!
//! | Entry | Content |
//! |-------|---------|
//! | `glyphs.txt` | UTF-8 text, one line per row |
//! | `foreground.png` | one pixel per cell, glyph color |
//! | `background.png` | one pixel per cell, background color |
//!
//! The image is as wide as the longest line and as tall as the number of
//! lines. A background pixel with alpha 0 makes its cell transparent.
//!
//! # Definitions
//!
//! Animations and sprites are JSON files whose image references are resolved
//! relative to the definition file:
//!
//! ```text
//! {"type": "LOOP", "frames": [{"image": "walk1.zip", "time": 0.2}, {"image": "walk2", "time": 0.4}]}
//! {"states": [{"name": "idle", "image": "idle.zip"}, {"name": "walk", "animation": "walk.json"}]}
//! ```

use std::io;
use std::path::PathBuf;

pub mod definition;
pub mod image_io;
pub mod pack;
pub mod tiler;

pub use tui_sprite_core as core;
pub use tui_sprite_types as types;

pub use definition::{
    load_animation, load_asset, load_sprite, AnimationDefinition, Asset, FrameDefinition,
    FrameTime, SpriteDefinition, StateDefinition,
};
pub use image_io::{create_blank, is_image_dir, read, read_archive, read_dir};
pub use pack::{pack, pack_tree};
pub use tiler::{overlay, tile, tiled_file_name};

/// Entry holding the glyph text.
pub const GLYPHS: &str = "glyphs.txt";
/// Entry holding the foreground color map.
pub const FOREGROUND: &str = "foreground.png";
/// Entry holding the background color map.
pub const BACKGROUND: &str = "background.png";

/// All entries of a text image, in archive order.
pub const ENTRIES: [&str; 3] = [GLYPHS, FOREGROUND, BACKGROUND];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image archive is missing entry {0:?}")]
    MissingEntry(&'static str),
    #[error("glyph entry is empty")]
    EmptyGlyphs,
    #[error("glyph grid of {columns}x{rows} is too large")]
    TooLarge { columns: usize, rows: usize },
    #[error("{entry} is {width}x{height} pixels but the glyphs need {columns}x{rows}")]
    ColorMapTooSmall {
        entry: &'static str,
        width: u32,
        height: u32,
        columns: u16,
        rows: u16,
    },
    #[error("failed to process {entry}: {source}")]
    Image {
        entry: String,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid image archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: frame time {1:?} is not a number", .0.display())]
    InvalidTime(PathBuf, String),
    #[error("{}: animation has no frames", .0.display())]
    NoFrames(PathBuf),
    #[error("{}: sprite has no states", .0.display())]
    NoStates(PathBuf),
    #[error("{}: state {name:?} has neither an image nor an animation", .path.display())]
    StateWithoutContent { path: PathBuf, name: String },
    #[error("{}: sprite state {name:?} is defined twice", .path.display())]
    DuplicateState { path: PathBuf, name: String },
    #[error("{}: not a usable path", .0.display())]
    InvalidPath(PathBuf),
    #[error("tile size must be positive, got {0}x{1}")]
    InvalidTileSize(u32, u32),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
