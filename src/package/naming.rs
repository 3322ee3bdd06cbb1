//! Output path resolution for repackaged archives

use std::path::{Path, PathBuf};

/// Characters that cannot appear in a build version used as a file name part
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Whether `build_version` can be embedded in a file name
pub fn is_valid_build_version(build_version: &str) -> bool {
    !build_version.is_empty()
        && build_version != "."
        && build_version != ".."
        && !build_version.contains(FORBIDDEN_CHARS)
        && !build_version.chars().any(char::is_control)
}

/// Candidate path for the given collision counter.
///
/// `counter == 0` yields `<stem>_<build>.<ext>`, anything else
/// `<stem>_<build>_<counter>.<ext>`.
pub fn candidate_path(source: &Path, build_version: &str, counter: u64) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = format!("{}_{}", stem, build_version);
    if counter > 0 {
        name.push_str(&format!("_{}", counter));
    }
    if let Some(ext) = source.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    source.with_file_name(name)
}

/// First candidate path next to `source` that does not exist yet.
///
/// The counter is unbounded; the search ends only on a free slot.
pub fn resolve_output_path(source: &Path, build_version: &str) -> PathBuf {
    let mut counter = 0;
    loop {
        let candidate = candidate_path(source, build_version, counter);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
