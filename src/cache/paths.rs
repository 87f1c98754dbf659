// Cache path utilities.
// Constructs filesystem paths for the cache hierarchy: one directory per release key.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::hashicorp::ReleaseKey;

/// Get the default cache root (~/.horn).
pub fn default_cache_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".horn"))
}

/// Directory name for a release's cache entry. Only path-safe keys reach the cache.
pub fn entry_name(key: &ReleaseKey) -> String {
    key.to_string()
}

/// Path to a release's cache entry directory.
pub fn entry_dir(root: &Path, key: &ReleaseKey) -> PathBuf {
    root.join(entry_name(key))
}

/// Path to a release's notes file.
pub fn notes_path(root: &Path, key: &ReleaseKey) -> PathBuf {
    entry_dir(root, key).join(key.notes_file_name())
}

/// Temp file used while writing a release's notes. It sits in the root, not the
/// entry, so a failed write never makes the entry look populated.
pub fn notes_temp_path(root: &Path, key: &ReleaseKey) -> PathBuf {
    root.join(format!(".{}.tmp", key.notes_file_name()))
}
