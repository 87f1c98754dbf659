// Cache module for local filesystem caching.
// Stores release notes text under one directory per release.

pub mod paths;
pub mod store;

pub use paths::default_cache_dir;
#[cfg(test)]
pub use store::MemoryStore;
pub use store::{FsStore, ReleaseStore};
