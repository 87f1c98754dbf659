// Application configuration.
// Loads the product list, endpoints, and cache location from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::{HornError, Result};

pub const DEFAULT_INDEX_BASE: &str = "https://releases.hashicorp.com";
pub const DEFAULT_NOTES_BASE: &str = "https://github.com/hashicorp";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Products whose releases are tracked.
    pub products: Vec<String>,
    /// Cache root; `~/.horn` when unset.
    pub cache_dir: Option<PathBuf>,
    /// Base URL of the release index (one page per product).
    pub index_base: String,
    /// Base URL of the per-release notes pages.
    pub notes_base: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            products: vec!["boundary".to_string(), "waypoint".to_string()],
            cache_dir: None,
            index_base: DEFAULT_INDEX_BASE.to_string(),
            notes_base: DEFAULT_NOTES_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("horn/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the platform config directory when `path` is None.
    /// Only the platform default may be missing; it then yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_json(&contents)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Product names become the first half of cache keys, so they may not hold `_` or path separators.
    pub fn validate(&self) -> Result<()> {
        for product in &self.products {
            if product.is_empty() {
                return Err(HornError::Config("empty product name".to_string()));
            }
            if product.contains(['_', '/', '\\']) {
                return Err(HornError::Config(format!(
                    "product name {:?} may not contain '_', '/' or '\\'",
                    product
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(HornError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Path to the config file (~/.config/horn/config.json on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "horn").map(|dirs| dirs.config_dir().join("config.json"))
}
