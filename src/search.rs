// Search flow: report releases whose notes contain a literal pattern.

use tracing::{debug, info, warn};

use crate::cache::ReleaseStore;
use crate::error::Result;
use crate::hashicorp::{Endpoints, PageSource, ReleaseKey, fetch_release_notes};

/// Where search reads notes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotesSource {
    /// Re-fetch every release over the network, refreshing the cache.
    #[default]
    Network,
    /// Read cached notes only.
    Cache,
}

/// Search the notes of each release in `releases` for `pattern` (plain substring).
///
/// Matches are logged and returned in input order. Releases whose notes are
/// unavailable are skipped.
pub async fn search_releases<S: PageSource, C: ReleaseStore>(
    source: &S,
    store: &C,
    endpoints: &Endpoints,
    releases: &[ReleaseKey],
    pattern: &str,
    from: NotesSource,
) -> Result<Vec<ReleaseKey>> {
    let mut matches = Vec::new();
    for key in releases {
        info!(
            "Searching release notes for {} v{}...",
            key.product, key.version
        );

        let notes = match from {
            NotesSource::Cache => store.get(key)?,
            NotesSource::Network => match fetch_release_notes(source, store, endpoints, key).await {
                Ok(notes) => notes,
                Err(e) if e.is_transport() => {
                    warn!("Skipping {}: {}", key, e);
                    continue;
                }
                Err(e) => return Err(e),
            },
        };

        let Some(notes) = notes else {
            debug!("No notes available for {}", key);
            continue;
        };
        if notes.contains(pattern) {
            info!(
                "Found match for {} in {} v{}",
                pattern, key.product, key.version
            );
            matches.push(key.clone());
        }
    }

    info!("{} of {} releases match", matches.len(), releases.len());
    Ok(matches)
}
