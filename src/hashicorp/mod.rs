// HashiCorp release sources.
// Lists releases from releases.hashicorp.com and fetches notes from GitHub release pages.

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub(crate) mod fake;
pub mod notes;
pub mod releases;
pub mod types;

pub use client::{HttpClient, PageSource};
pub use endpoints::Endpoints;
pub use notes::fetch_release_notes;
pub use releases::list_releases;
pub use types::ReleaseKey;
