// Release notes fetching.
// Pulls the notes block from a GitHub release page, normalizes it, and caches it.

use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::cache::ReleaseStore;
use crate::error::Result;

use super::client::PageSource;
use super::endpoints::Endpoints;
use super::types::ReleaseKey;

/// Structural marker of the notes block on a GitHub release page.
const NOTES_SELECTOR: &str = r#"div[data-test-selector="body-content"]"#;

/// Fetch notes for a release and write them to the store.
///
/// Returns `Ok(None)` when the page is missing or has no notes block.
/// Transport errors are returned so the caller can decide whether to go on.
pub async fn fetch_release_notes<S: PageSource, C: ReleaseStore>(
    source: &S,
    store: &C,
    endpoints: &Endpoints,
    key: &ReleaseKey,
) -> Result<Option<String>> {
    info!("Getting release notes for {} {}", key.product, key.version);
    let url = endpoints.notes_url(key);

    let page = source.get_page(&url).await?;
    if !page.is_success() {
        warn!("Error fetching {}: HTTP {}", url, page.status.as_u16());
        return Ok(None);
    }

    let Some(body) = extract_notes(&page.body) else {
        warn!("No release notes found for {} {}", key.product, key.version);
        return Ok(None);
    };

    let text = normalize_notes(&url, &body);
    store.put(key, &text)?;
    info!("Release notes saved to {}", store.location(key));

    Ok(Some(text))
}

/// Text of the notes block, trimmed. None if the page has no such block.
pub fn extract_notes(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(NOTES_SELECTOR).ok()?;
    let block = document.select(&selector).next()?;
    Some(block.text().collect::<String>().trim().to_string())
}

/// Prefix the source URL and turn lines opening with `(PR)` into `- PR` list items.
pub fn normalize_notes(url: &str, body: &str) -> String {
    format!("{}\n\n{}", url, body).replace("\n(PR)", "\n- PR")
}
