// Release identifiers.
// A release is a (product, version) pair; its key form names cache entries on disk.

use std::fmt;

/// Characters that cannot appear in a cache entry name on common filesystems.
const UNSAFE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A single product release, e.g. `waypoint` at `0.11.2`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseKey {
    pub product: String,
    pub version: String,
}

impl ReleaseKey {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
        }
    }

    /// Parse a `{product}_{version}` key.
    ///
    /// Splits on the first underscore. Product names never contain one, so
    /// versions like `1.0_rc1` survive the round trip.
    pub fn parse(key: &str) -> Option<Self> {
        let (product, version) = key.split_once('_')?;
        let key = Self::new(product, version);
        key.is_path_safe().then_some(key)
    }

    /// Whether the key can name a cache entry verbatim and parse back unchanged.
    pub fn is_path_safe(&self) -> bool {
        let part_ok = |part: &str| {
            !part.is_empty() && part != "." && part != ".." && !part.contains(UNSAFE_CHARS)
        };
        part_ok(&self.product) && !self.product.contains('_') && part_ok(&self.version)
    }

    /// Name of the notes file stored inside this release's cache entry.
    pub fn notes_file_name(&self) -> String {
        format!("{}_release_notes.txt", self)
    }
}

impl fmt::Display for ReleaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.product, self.version)
    }
}
