//! Stateful extract → edit → repackage workflow

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::package::archive::{create_archive, extract_archive, files_with_extension, reset_dir};
use crate::package::error::PackageError;
use crate::package::metadata::{MetadataRecord, read_metadata, write_metadata};
use crate::package::naming::{is_valid_build_version, resolve_output_path};

/// Extension of the project database inside a package
pub const DATABASE_EXTENSION: &str = "mpr";

/// A package that has been extracted into the scratch directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPackage {
    pub archive_path: PathBuf,
    pub database_path: PathBuf,
}

/// Owns the scratch directory and the currently loaded package.
///
/// Only one package is loaded at a time; every [`Pipeline::extract`] replaces
/// the scratch directory contents.
#[derive(Debug)]
pub struct Pipeline {
    scratch_dir: PathBuf,
    loaded: Option<LoadedPackage>,
}

impl Pipeline {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            loaded: None,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn loaded(&self) -> Option<&LoadedPackage> {
        self.loaded.as_ref()
    }

    pub fn loaded_archive(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|p| p.archive_path.as_path())
    }

    /// Extract `archive_path` into the scratch directory and read its
    /// version metadata.
    ///
    /// On failure no package stays loaded.
    pub fn extract(&mut self, archive_path: &Path) -> Result<MetadataRecord, PackageError> {
        self.loaded = None;

        info!("Extracting {:?} into {:?}", archive_path, self.scratch_dir);

        reset_dir(&self.scratch_dir)
            .map_err(|e| PackageError::extraction(&self.scratch_dir, e))?;
        extract_archive(archive_path, &self.scratch_dir)?;

        let database_path = self.locate_database()?;
        let record = read_metadata(&database_path)?;

        info!(
            "Loaded {:?}: product version {}, build version {}",
            archive_path, record.product_version, record.build_version
        );

        self.loaded = Some(LoadedPackage {
            archive_path: archive_path.to_path_buf(),
            database_path,
        });

        Ok(record)
    }

    /// Re-read the metadata of the loaded package.
    pub fn metadata(&self) -> Result<MetadataRecord, PackageError> {
        let loaded = self.loaded.as_ref().ok_or(PackageError::NoPackageLoaded)?;
        read_metadata(&loaded.database_path)
    }

    /// Write both version fields and repackage the scratch directory next to
    /// the original archive. Returns the path of the new package.
    pub fn save(&self, product_version: &str, build_version: &str) -> Result<PathBuf, PackageError> {
        let loaded = self.loaded.as_ref().ok_or(PackageError::NoPackageLoaded)?;

        if !is_valid_build_version(build_version) {
            return Err(PackageError::InvalidBuildVersion(build_version.to_string()));
        }

        let record = MetadataRecord {
            product_version: product_version.to_string(),
            build_version: build_version.to_string(),
        };
        let updated = write_metadata(&loaded.database_path, &record)?;
        if updated != 1 {
            warn!("Expected one metadata row, updated {}", updated);
        }

        let output_path = resolve_output_path(&loaded.archive_path, build_version);
        create_archive(&self.scratch_dir, &output_path)?;

        info!("Saved package as {:?}", output_path);
        Ok(output_path)
    }

    fn locate_database(&self) -> Result<PathBuf, PackageError> {
        let mut found = files_with_extension(&self.scratch_dir, DATABASE_EXTENSION)
            .map_err(|e| PackageError::extraction(&self.scratch_dir, e))?;

        match found.len() {
            0 => Err(PackageError::DatabaseNotFound(self.scratch_dir.clone())),
            1 => Ok(found.remove(0)),
            _ => Err(PackageError::AmbiguousDatabase(found)),
        }
    }
}
