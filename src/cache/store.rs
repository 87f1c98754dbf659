// Cache store for release notes.
// Tracks one entry per release; an entry with no notes file still needs fetching.

#[cfg(test)]
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fs::{self, DirBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use tracing::debug;

use crate::error::{HornError, Result};
use crate::hashicorp::ReleaseKey;

use super::paths;

/// Storage for cached release notes.
pub trait ReleaseStore {
    /// Ensure an entry exists for every key and return the keys with no notes yet.
    ///
    /// Keys come back in input order without duplicates. Running twice with the
    /// same keys creates nothing new and returns the same set until entries are filled.
    fn prepare(&self, keys: &[ReleaseKey]) -> Result<Vec<ReleaseKey>>;

    /// Store notes text for a release, replacing anything already there.
    fn put(&self, key: &ReleaseKey, text: &str) -> Result<()>;

    /// Read cached notes text, if the release has been fetched.
    fn get(&self, key: &ReleaseKey) -> Result<Option<String>>;

    /// All known releases, sorted.
    fn keys(&self) -> Result<Vec<ReleaseKey>>;

    /// Human-readable location of a release's notes, for log lines.
    fn location(&self, key: &ReleaseKey) -> String {
        key.to_string()
    }
}

/// Filesystem-backed store rooted at a directory (normally ~/.horn).
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn ensure_dir(path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(path)?;
        Ok(true)
    }

    fn check_key(key: &ReleaseKey) -> Result<()> {
        if key.is_path_safe() {
            Ok(())
        } else {
            Err(HornError::UnsafeKey(key.to_string()))
        }
    }

    fn write_temp(path: &Path, text: &str) -> Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

impl ReleaseStore for FsStore {
    fn prepare(&self, keys: &[ReleaseKey]) -> Result<Vec<ReleaseKey>> {
        if Self::ensure_dir(&self.root)? {
            debug!("Created cache root {}", self.root.display());
        }

        let mut seen = HashSet::new();
        let mut empty = Vec::new();
        for key in keys {
            if !seen.insert(key) {
                continue;
            }
            Self::check_key(key)?;
            let dir = paths::entry_dir(&self.root, key);
            if Self::ensure_dir(&dir)? {
                debug!("Created cache entry {}", dir.display());
            }
            // Anything other than the notes file (stray temp files included) leaves it pending.
            if !paths::notes_path(&self.root, key).is_file() {
                empty.push(key.clone());
            }
        }
        Ok(empty)
    }

    fn put(&self, key: &ReleaseKey, text: &str) -> Result<()> {
        Self::check_key(key)?;
        Self::ensure_dir(&paths::entry_dir(&self.root, key))?;
        let path = paths::notes_path(&self.root, key);

        // Write atomically via temp file in the root
        let temp_path = paths::notes_temp_path(&self.root, key);
        let written = Self::write_temp(&temp_path, text)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(HornError::from));
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn get(&self, key: &ReleaseKey) -> Result<Option<String>> {
        let path = paths::notes_path(&self.root, key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn keys(&self) -> Result<Vec<ReleaseKey>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(ReleaseKey::parse) {
                Some(key) => keys.push(key),
                None => debug!("Ignoring cache entry {:?}", name),
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn location(&self, key: &ReleaseKey) -> String {
        paths::notes_path(&self.root, key).display().to_string()
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<ReleaseKey, Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<ReleaseKey, Option<String>>> {
        // A panic while holding the lock leaves the map intact, so poisoning is ignored.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl ReleaseStore for MemoryStore {
    fn prepare(&self, keys: &[ReleaseKey]) -> Result<Vec<ReleaseKey>> {
        let mut entries = self.entries();
        let mut seen = HashSet::new();
        let mut empty = Vec::new();
        for key in keys {
            if !seen.insert(key) {
                continue;
            }
            if entries.entry(key.clone()).or_insert(None).is_none() {
                empty.push(key.clone());
            }
        }
        Ok(empty)
    }

    fn put(&self, key: &ReleaseKey, text: &str) -> Result<()> {
        self.entries().insert(key.clone(), Some(text.to_string()));
        Ok(())
    }

    fn get(&self, key: &ReleaseKey) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned().flatten())
    }

    fn keys(&self) -> Result<Vec<ReleaseKey>> {
        Ok(self.entries().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keys() -> Vec<ReleaseKey> {
        vec![
            ReleaseKey::new("boundary", "0.13.0"),
            ReleaseKey::new("waypoint", "0.11.2"),
        ]
    }

    #[test]
    fn test_prepare_creates_root_and_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);

        let empty = store.prepare(&keys()).unwrap();
        assert_eq!(empty, keys());
        assert!(root.join("boundary_0.13.0").is_dir());
        assert!(root.join("waypoint_0.11.2").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        store.prepare(&keys()).unwrap();

        let root_mode = fs::metadata(&root).unwrap().permissions().mode() & 0o777;
        let entry_mode = fs::metadata(root.join("boundary_0.13.0"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(root_mode, 0o700);
        assert_eq!(entry_mode, 0o700);
    }

    #[test]
    fn test_prepare_is_idempotent_until_populated() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path().join("horn"));

        assert_eq!(store.prepare(&keys()).unwrap().len(), 2);
        assert_eq!(store.prepare(&keys()).unwrap().len(), 2);

        store.put(&keys()[0], "notes").unwrap();
        assert_eq!(store.prepare(&keys()).unwrap(), vec![keys()[1].clone()]);
    }

    #[test]
    fn test_prepare_skips_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path().join("horn"));

        let mut doubled = keys();
        doubled.extend(keys());
        assert_eq!(store.prepare(&doubled).unwrap(), keys());
    }

    #[test]
    fn test_put_creates_entry_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        let key = ReleaseKey::new("waypoint", "0.11.2");

        store.put(&key, "first").unwrap();
        store.put(&key, "second").unwrap();

        let path = root.join("waypoint_0.11.2/waypoint_0.11.2_release_notes.txt");
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(store.get(&key).unwrap(), Some("second".to_string()));
        assert_eq!(store.location(&key), path.display().to_string());

        assert_eq!(fs::read_dir(root.join("waypoint_0.11.2")).unwrap().count(), 1);
        assert!(!paths::notes_temp_path(&root, &key).exists());
    }

    #[test]
    fn test_stray_file_leaves_entry_pending() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        let key = ReleaseKey::new("waypoint", "0.11.2");
        store.prepare(&[key.clone()]).unwrap();

        // Leftover from an interrupted write.
        fs::write(root.join("waypoint_0.11.2/waypoint_0.11.2_release_notes.tmp"), "par").unwrap();

        assert_eq!(store.prepare(&[key.clone()]).unwrap(), vec![key.clone()]);
        assert!(store.get(&key).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_put_leaves_entry_pending() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        let key = ReleaseKey::new("waypoint", "0.11.2");
        store.prepare(&[key.clone()]).unwrap();

        // A directory where the notes file should go makes the rename fail.
        fs::create_dir(paths::notes_path(&root, &key)).unwrap();
        assert!(store.put(&key, "notes").is_err());
        assert!(!paths::notes_temp_path(&root, &key).exists());

        fs::remove_dir(paths::notes_path(&root, &key)).unwrap();
        assert_eq!(store.prepare(&[key.clone()]).unwrap(), vec![key]);
    }

    #[test]
    fn test_unsafe_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        let key = ReleaseKey::new("waypoint", "0.11.2/");

        assert!(matches!(
            store.prepare(&[key.clone()]).unwrap_err(),
            HornError::UnsafeKey(_)
        ));
        assert!(matches!(
            store.put(&key, "notes").unwrap_err(),
            HornError::UnsafeKey(_)
        ));
        assert!(!root.join("waypoint_0.11.2_").exists());
    }

    #[test]
    fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());
        assert!(store.get(&keys()[0]).unwrap().is_none());
    }

    #[test]
    fn test_keys_lists_parsable_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("horn");
        let store = FsStore::new(&root);
        store.prepare(&keys()).unwrap();
        store.put(&ReleaseKey::new("vault", "1.0_rc1"), "x").unwrap();
        fs::create_dir(root.join("scratch")).unwrap();
        fs::write(root.join("notes_file.txt"), "").unwrap();

        let listed = store.keys().unwrap();
        assert_eq!(
            listed,
            vec![
                ReleaseKey::new("boundary", "0.13.0"),
                ReleaseKey::new("vault", "1.0_rc1"),
                ReleaseKey::new("waypoint", "0.11.2"),
            ]
        );
    }

    #[test]
    fn test_keys_without_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path().join("missing"));
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();

        assert_eq!(store.prepare(&keys()).unwrap(), keys());
        store.put(&keys()[1], "notes").unwrap();

        assert_eq!(store.prepare(&keys()).unwrap(), vec![keys()[0].clone()]);
        assert_eq!(store.get(&keys()[1]).unwrap(), Some("notes".to_string()));
        assert!(store.get(&keys()[0]).unwrap().is_none());
        assert_eq!(store.keys().unwrap(), keys());
    }
}
