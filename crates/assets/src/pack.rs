//! Packing image directories into zip archives.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::image_io::is_image_dir;
use crate::{LoadError, ENTRIES};

/// Pack the image directory `dir` into `<parent>/<name>.zip`, replacing any
/// existing archive. Returns the archive path.
pub fn pack(dir: &Path) -> Result<PathBuf, LoadError> {
    let name = dir
        .file_name()
        .ok_or_else(|| LoadError::InvalidPath(dir.to_path_buf()))?;
    let mut archive_name = name.to_os_string();
    archive_name.push(".zip");
    let target = dir.with_file_name(archive_name);

    let file = File::create(&target).map_err(|e| LoadError::io(&target, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in ENTRIES {
        let path = dir.join(entry);
        let mut source = BufReader::new(File::open(&path).map_err(|e| LoadError::io(&path, e))?);
        zip.start_file(entry, options)?;
        io::copy(&mut source, &mut zip).map_err(|e| LoadError::io(&path, e))?;
    }
    let writer = zip.finish()?;
    writer
        .into_inner()
        .map_err(|e| LoadError::io(&target, e.into_error()))?;

    debug!(dir = %dir.display(), archive = %target.display(), "packed image");
    Ok(target)
}

/// Pack every image directory under `root`, including `root` itself.
///
/// Directories are visited in name order; an image directory is packed and
/// not descended into. Returns the archives written.
pub fn pack_tree(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut packed = Vec::new();
    visit(root, &mut packed)?;
    info!(root = %root.display(), count = packed.len(), "packed image tree");
    Ok(packed)
}

fn visit(dir: &Path, packed: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    if is_image_dir(dir) {
        packed.push(pack(dir)?);
        return Ok(());
    }

    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))? {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            children.push(path);
        }
    }
    children.sort();

    for child in children {
        visit(&child, packed)?;
    }
    Ok(())
}
