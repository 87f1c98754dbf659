// URL construction for the two upstream sources.
// The release index lists versions per product; GitHub release pages hold the notes.

use crate::config::Config;

use super::types::ReleaseKey;

/// Base URLs for the release index and the notes pages.
#[derive(Debug, Clone)]
pub struct Endpoints {
    index_base: String,
    notes_base: String,
}

impl Endpoints {
    pub fn new(index_base: impl Into<String>, notes_base: impl Into<String>) -> Self {
        Self {
            index_base: index_base.into().trim_end_matches('/').to_string(),
            notes_base: notes_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.index_base, &config.notes_base)
    }

    /// Release index page for a product, e.g. `https://releases.hashicorp.com/waypoint/`.
    pub fn index_url(&self, product: &str) -> String {
        format!("{}/{}/", self.index_base, product)
    }

    /// Notes page for a release, e.g. `https://github.com/hashicorp/waypoint/releases/tag/v0.11.2`.
    pub fn notes_url(&self, key: &ReleaseKey) -> String {
        format!(
            "{}/{}/releases/tag/v{}",
            self.notes_base, key.product, key.version
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
