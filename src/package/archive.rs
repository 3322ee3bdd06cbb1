//! Zip extraction and compression for package files

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::package::error::PackageError;

/// Make sure `dir` exists and is empty.
///
/// Nested directories left behind by a previous extraction are removed too,
/// so no stale files end up in the next package.
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// Decompress every entry of `archive_path` into `dest`, overwriting
/// existing files. Returns the number of files written.
///
/// Entries whose names would escape `dest` are skipped.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize, PackageError> {
    let written = unzip(archive_path, dest)
        .map_err(|e| PackageError::extraction(archive_path, e))?;

    debug!("Extracted {} files from {:?}", written, archive_path);
    Ok(written)
}

fn unzip(archive_path: &Path, dest: &Path) -> ZipResult<usize> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };

        let out_path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
        written += 1;
    }

    Ok(written)
}

/// Compress the whole tree under `source_dir` into a new zip at `dest`.
/// Returns the number of files stored.
///
/// `dest` is opened with create-new semantics: an existing file is an error
/// and is left untouched. If compression fails, the partially written `dest`
/// is removed.
pub fn create_archive(source_dir: &Path, dest: &Path) -> Result<usize, PackageError> {
    let file = File::create_new(dest).map_err(|e| PackageError::repackage(dest, e))?;
    let stored = zip_tree(source_dir, file).map_err(|e| {
        // Drop the partial archive so the name stays free for the next save.
        if let Err(remove_err) = fs::remove_file(dest) {
            warn!("Failed to remove partial archive {:?}: {}", dest, remove_err);
        }
        PackageError::repackage(dest, e)
    })?;

    debug!("Stored {} files into {:?}", stored, dest);
    Ok(stored)
}

fn zip_tree(source_dir: &Path, file: File) -> ZipResult<usize> {
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut stored = 0;
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(io::Error::other)?;
        let name = entry_name(relative);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            let size = entry.metadata().map_err(io::Error::from)?.len();
            zip.start_file(name, options.large_file(size >= u32::MAX as u64))?;
            io::copy(&mut File::open(entry.path())?, &mut zip)?;
            stored += 1;
        }
    }

    zip.finish()?;
    Ok(stored)
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// List the files directly inside `dir` whose extension is `extension`
/// (case-insensitive), sorted by path.
pub fn files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
