//! Known Mendix version list
//!
//! Downloads a newline-delimited list of product versions and returns it
//! newest first.
//!
//! # Modules
//!
//! - [`version`]: dotted-numeric [`MendixVersion`] with its ordering
//! - [`source`]: [`VersionListSource`] trait and its HTTP implementation
//! - [`fetcher`]: list parsing and the background fetch task
//! - [`error`]: error types for fetching and parsing

pub mod error;
pub mod fetcher;
pub mod source;
pub mod version;

pub use error::{ParseVersionError, VersionListError};
pub use fetcher::{parse_version_list, spawn_fetch};
pub use source::{HttpVersionList, VersionListSource};
pub use version::MendixVersion;
