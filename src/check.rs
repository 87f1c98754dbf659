// Check flow: discover releases, create cache entries, fetch notes for empty ones.
// Only empty entries are fetched, so a repeat run does no redundant network work.

use tracing::{info, warn};

use crate::cache::ReleaseStore;
use crate::error::Result;
use crate::hashicorp::{Endpoints, PageSource, fetch_release_notes, list_releases};

/// Counts from one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Releases listed across all products.
    pub discovered: usize,
    /// Entries that were empty before this run.
    pub pending: usize,
    /// Notes fetched and cached.
    pub fetched: usize,
    /// Pages without notes or with an error status.
    pub missing: usize,
    /// Requests that failed in transport.
    pub failed: usize,
}

/// Bring the cache up to date with the release index.
///
/// Network failures skip the affected release; filesystem failures abort.
pub async fn check_releases<S: PageSource, C: ReleaseStore>(
    source: &S,
    store: &C,
    endpoints: &Endpoints,
    products: &[String],
) -> Result<CheckSummary> {
    info!("Updating local resources from online release note stores");

    let releases = list_releases(source, endpoints, products).await?;
    let pending = store.prepare(&releases)?;

    let mut summary = CheckSummary {
        discovered: releases.len(),
        pending: pending.len(),
        ..Default::default()
    };

    for key in &pending {
        info!("Found empty release directory in my cache for: {}", key);
        match fetch_release_notes(source, store, endpoints, key).await {
            Ok(Some(_)) => summary.fetched += 1,
            Ok(None) => summary.missing += 1,
            Err(e) if e.is_transport() => {
                warn!("Skipping {}: {}", key, e);
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Check complete: {} releases, {} fetched, {} without notes, {} failed",
        summary.discovered, summary.fetched, summary.missing, summary.failed
    );
    Ok(summary)
}
