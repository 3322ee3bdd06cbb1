//! Package transform pipeline
//!
//! Edits the version metadata of a Mendix package (`.mpk`) in four steps:
//!
//! ```text
//! ┌───────────┐     ┌─────────────┐     ┌───────────┐     ┌─────────────┐
//! │  Extract  │────▶│    Read     │────▶│   Write   │────▶│  Repackage  │
//! │ (archive) │     │ (metadata)  │     │(metadata) │     │  (archive)  │
//! └───────────┘     └─────────────┘     └───────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`archive`]: zip extraction and compression of the scratch directory
//! - [`metadata`]: SQLite access to the `_MetaData` table of the `.mpr` file
//! - [`naming`]: collision-free output path resolution
//! - [`pipeline`]: the stateful [`Pipeline`] tying the steps together
//! - [`error`]: error type for all pipeline operations

pub mod archive;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod pipeline;

pub use error::PackageError;
pub use metadata::MetadataRecord;
pub use pipeline::Pipeline;
