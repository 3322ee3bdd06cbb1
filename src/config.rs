use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Remote version list
// =============================================================================

/// Default location of the newline-delimited list of known Mendix versions
pub const DEFAULT_VERSIONS_URL: &str = "https://www.lowcodeconnect.nl/mendixversions.txt";

/// Timeout for the version list request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Client identifier sent with the version list request
pub const USER_AGENT: &str = "MxVerChanger/1.0";

/// Name of the scratch directory created under the system temp directory
const SCRATCH_DIR_NAME: &str = "MPKEditor";

const APP_DIR_NAME: &str = "mpk-version-changer";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tool configuration, read from `config.json` in the data directory
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// URL of the known version list
    pub versions_url: String,
    /// Version list request timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Extraction target; falls back to [`default_scratch_dir`]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            scratch_dir: None,
        }
    }
}

impl AppConfig {
    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(default_scratch_dir)
    }
}

/// Returns the path to the data directory for mpk-version-changer.
/// Uses $XDG_DATA_HOME/mpk-version-changer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/mpk-version-changer,
/// or ./mpk-version-changer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("mpk-version-changer.log")
}

/// Returns the default scratch directory used for package extraction.
pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join(SCRATCH_DIR_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR_NAME)
}
