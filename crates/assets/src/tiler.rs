//! Tile grid overlay for reference images.
//!
//! Draws white lines every `width` pixels horizontally and every `height`
//! pixels vertically, skipping the first row and column, and writes the result
//! next to the input as `<stem>_tiled<W>x<H>.<ext>`.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::LoadError;

const GRID: Rgb<u8> = Rgb([255, 255, 255]);

/// Output path for tiling `path` with `width` x `height` tiles.
pub fn tiled_file_name(path: &Path, width: u32, height: u32) -> Result<PathBuf, LoadError> {
    let stem = path
        .file_stem()
        .ok_or_else(|| LoadError::InvalidPath(path.to_path_buf()))?
        .to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_tiled{width}x{height}.{}", ext.to_string_lossy()),
        None => format!("{stem}_tiled{width}x{height}"),
    };
    Ok(path.with_file_name(name))
}

/// Overlay the grid on an opaque copy of `image`.
pub fn overlay(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if x >= 1 && y >= 1 && (x % width == 0 || y % height == 0) {
            *pixel = GRID;
        }
    }
    out
}

/// Tile the image at `path` and save it. Returns the written path.
pub fn tile(path: &Path, width: u32, height: u32) -> Result<PathBuf, LoadError> {
    if width == 0 || height == 0 {
        return Err(LoadError::InvalidTileSize(width, height));
    }
    let entry = path.display().to_string();
    let image = image::open(path)
        .map_err(|source| LoadError::Image {
            entry: entry.clone(),
            source,
        })?
        .to_rgb8();

    let target = tiled_file_name(path, width, height)?;
    overlay(&image, width, height)
        .save(&target)
        .map_err(|source| LoadError::Image { entry, source })?;

    debug!(source = %path.display(), target = %target.display(), width, height, "tiled image");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_keep_directory_and_extension() {
        assert_eq!(
            tiled_file_name(Path::new("art/map.png"), 8, 16).unwrap(),
            PathBuf::from("art/map_tiled8x16.png")
        );
    }

    #[test]
    fn test_grid_skips_first_row_and_column() {
        let image = RgbImage::new(5, 5);
        let out = overlay(&image, 2, 3);
        assert_eq!(*out.get_pixel(0, 2), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(2, 0), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(2, 1), GRID);
        assert_eq!(*out.get_pixel(1, 3), GRID);
        assert_eq!(*out.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_zero_tile_size_is_rejected() {
        assert!(matches!(
            tile(Path::new("missing.png"), 0, 4),
            Err(LoadError::InvalidTileSize(0, 4))
        ));
    }
}
