//! Shared test utilities

pub mod package;

pub use package::{PackageFixture, read_zip_entries};
