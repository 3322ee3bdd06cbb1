//! Version list parsing and background fetching

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::versions::error::VersionListError;
use crate::versions::source::VersionListSource;
use crate::versions::version::MendixVersion;

pub type FetchResult = Result<Vec<MendixVersion>, VersionListError>;

/// Parse a newline-delimited version list, newest first.
///
/// Blank lines are skipped. A single malformed line fails the whole list.
pub fn parse_version_list(body: &str) -> FetchResult {
    let mut versions = body
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<MendixVersion>()
                .map_err(|source| VersionListError::Parse {
                    line: line.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    versions.sort();
    versions.reverse();
    Ok(versions)
}

/// Start fetching the version list on a background task.
///
/// The result arrives on the returned receiver. Dropping the receiver
/// discards the result once the fetch completes; the fetch itself is never
/// cancelled.
pub fn spawn_fetch(source: Arc<dyn VersionListSource>) -> oneshot::Receiver<FetchResult> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(deliver(source, tx));
    rx
}

/// Run the fetch and send its outcome. Returns whether anyone received it.
async fn deliver(source: Arc<dyn VersionListSource>, tx: oneshot::Sender<FetchResult>) -> bool {
    let result = source.fetch_versions().await;

    match &result {
        Ok(versions) => info!("Fetched {} known versions", versions.len()),
        Err(e) => error!("Failed to fetch version list: {}", e),
    }

    if tx.send(result).is_err() {
        debug!("Version list receiver dropped, discarding result");
        return false;
    }
    true
}
