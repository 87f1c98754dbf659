// Error types for horn.
// Separates transport faults, which are isolated per release, from filesystem and config faults.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HornError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Release {0:?} cannot be stored as a cache entry name")]
    UnsafeKey(String),

    #[error("Could not determine the home directory for the cache")]
    NoHomeDir,
}

impl HornError {
    /// Whether this error came from the network and should only skip the current item.
    pub fn is_transport(&self) -> bool {
        matches!(self, HornError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, HornError>;
