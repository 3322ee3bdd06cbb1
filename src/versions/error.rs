use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVersionError {
    #[error("expected 2 to 4 dot-separated components, found {0}")]
    ComponentCount(usize),

    #[error("invalid component {0:?}")]
    InvalidComponent(String),
}

#[derive(Debug, Error)]
pub enum VersionListError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network error: unexpected status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Invalid version {line:?}: {source}")]
    Parse {
        line: String,
        source: ParseVersionError,
    },
}
