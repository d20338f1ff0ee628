//! Reading and creating text images.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use image::{Rgb as Pixel, RgbImage, RgbaImage};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::{Cell, Surface};
use crate::types::{Rgb, DEFAULT_FOREGROUND};
use crate::{LoadError, BACKGROUND, ENTRIES, FOREGROUND, GLYPHS};

/// Read a text image from a directory or a zip archive.
pub fn read(path: &Path) -> Result<Surface, LoadError> {
    if path.is_dir() {
        return read_dir(path);
    }
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let surface = read_archive(BufReader::new(file))?;
    debug!(path = %path.display(), size = ?surface.size(), "read image archive");
    Ok(surface)
}

/// Read the three image entries from files in `dir`.
pub fn read_dir(dir: &Path) -> Result<Surface, LoadError> {
    let glyphs = fs::read_to_string(dir.join(GLYPHS)).map_err(|e| LoadError::io(dir.join(GLYPHS), e))?;
    let foreground = decode(FOREGROUND, &read_file(&dir.join(FOREGROUND))?)?;
    let background = decode(BACKGROUND, &read_file(&dir.join(BACKGROUND))?)?;
    let surface = compose(&glyphs, &foreground, &background)?;
    debug!(dir = %dir.display(), size = ?surface.size(), "read image directory");
    Ok(surface)
}

/// Read the three image entries from a zip archive.
pub fn read_archive<R: Read + Seek>(reader: R) -> Result<Surface, LoadError> {
    let mut archive = ZipArchive::new(reader)?;
    let glyphs = String::from_utf8(read_entry(&mut archive, GLYPHS)?)
        .map_err(|e| LoadError::io(GLYPHS, io::Error::new(io::ErrorKind::InvalidData, e)))?;
    let foreground = decode(FOREGROUND, &read_entry(&mut archive, FOREGROUND)?)?;
    let background = decode(BACKGROUND, &read_entry(&mut archive, BACKGROUND)?)?;
    compose(&glyphs, &foreground, &background)
}

/// Whether `dir` is a directory holding exactly the three image entries.
pub fn is_image_dir(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    let names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.len() == ENTRIES.len() && ENTRIES.iter().all(|entry| names.iter().any(|n| n == entry))
}

/// Write a blank `columns` x `rows` image directory: space glyphs, light gray
/// foreground, opaque black background.
pub fn create_blank(dir: &Path, columns: u16, rows: u16) -> Result<(), LoadError> {
    fs::create_dir_all(dir).map_err(|e| LoadError::io(dir, e))?;

    let line = " ".repeat(columns as usize);
    let glyphs = vec![line; rows as usize].join("\n");
    fs::write(dir.join(GLYPHS), glyphs).map_err(|e| LoadError::io(dir.join(GLYPHS), e))?;

    let (w, h) = (columns as u32, rows as u32);
    save_png(dir, BACKGROUND, &RgbImage::new(w, h))?;
    let fg = DEFAULT_FOREGROUND;
    save_png(dir, FOREGROUND, &RgbImage::from_pixel(w, h, Pixel([fg.r, fg.g, fg.b])))?;

    debug!(dir = %dir.display(), columns, rows, "created blank image");
    Ok(())
}

fn save_png(dir: &Path, entry: &str, image: &RgbImage) -> Result<(), LoadError> {
    image
        .save_with_format(dir.join(entry), image::ImageFormat::Png)
        .map_err(|source| LoadError::Image {
            entry: entry.to_string(),
            source,
        })
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|e| LoadError::io(path, e))
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &'static str,
) -> Result<Vec<u8>, LoadError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(LoadError::MissingEntry(name)),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::io(name, e))?;
    Ok(bytes)
}

fn decode(entry: &str, bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    image::load_from_memory(bytes)
        .map(|image| image.to_rgba8())
        .map_err(|source| LoadError::Image {
            entry: entry.to_string(),
            source,
        })
}

/// Combine glyph text and color maps into a surface.
pub(crate) fn compose(
    glyphs: &str,
    foreground: &RgbaImage,
    background: &RgbaImage,
) -> Result<Surface, LoadError> {
    let lines: Vec<&str> = glyphs.lines().collect();
    if lines.is_empty() {
        return Err(LoadError::EmptyGlyphs);
    }
    let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = lines.len();
    let (Ok(columns), Ok(rows)) = (u16::try_from(columns), u16::try_from(rows)) else {
        return Err(LoadError::TooLarge { columns, rows });
    };

    for (entry, map) in [(FOREGROUND, foreground), (BACKGROUND, background)] {
        if map.width() < columns as u32 || map.height() < rows as u32 {
            return Err(LoadError::ColorMapTooSmall {
                entry,
                width: map.width(),
                height: map.height(),
                columns,
                rows,
            });
        }
    }

    let mut surface = Surface::new(columns, rows);
    for (y, line) in lines.iter().enumerate() {
        let mut chars = line.chars();
        for x in 0..columns {
            let glyph = chars.next().unwrap_or(' ');
            let (px, py) = (x as u32, y as u32);
            let cell = Cell {
                glyph,
                foreground: opaque(foreground, px, py).unwrap_or(DEFAULT_FOREGROUND),
                background: opaque(background, px, py),
            };
            surface.set(x, y as u16, cell);
        }
    }
    Ok(surface)
}

/// Pixel color, or `None` when it is fully transparent.
fn opaque(map: &RgbaImage, x: u32, y: u32) -> Option<Rgb> {
    let [r, g, b, a] = map.get_pixel(x, y).0;
    (a != 0).then_some(Rgb::new(r, g, b))
}
