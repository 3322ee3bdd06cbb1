use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to extract {path:?}: {reason}")]
    ExtractionFailed { path: PathBuf, reason: String },

    #[error("No project database (.mpr) found in {0:?}")]
    DatabaseNotFound(PathBuf),

    #[error("Package contains more than one project database: {0:?}")]
    AmbiguousDatabase(Vec<PathBuf>),

    #[error("Metadata access error: {0}")]
    MetadataAccess(#[from] rusqlite::Error),

    #[error("No package loaded")]
    NoPackageLoaded,

    #[error("Build version {0:?} cannot be used in a file name")]
    InvalidBuildVersion(String),

    #[error("Failed to write package {path:?}: {reason}")]
    RepackageFailed { path: PathBuf, reason: String },
}

impl PackageError {
    pub(crate) fn extraction(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn repackage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::RepackageFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
