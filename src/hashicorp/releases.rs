// Release discovery from the release index.
// Each product's index page links to one directory per published version.

use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::error::Result;

use super::client::PageSource;
use super::endpoints::Endpoints;
use super::types::ReleaseKey;

/// Link text containing this marks parent-directory navigation.
const PARENT_MARKER: &str = "..";

/// List releases for every product. Products that fail to load are skipped.
pub async fn list_releases<S: PageSource>(
    source: &S,
    endpoints: &Endpoints,
    products: &[String],
) -> Result<Vec<ReleaseKey>> {
    let mut releases = Vec::new();
    for product in products {
        info!("{}...", product);
        let url = endpoints.index_url(product);

        let page = match source.get_page(&url).await {
            Ok(page) => page,
            Err(e) if e.is_transport() => {
                warn!("Error fetching {}: {}", url, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        if !page.is_success() {
            warn!("Error fetching {}: HTTP {}", url, page.status.as_u16());
            continue;
        }

        let found = parse_index(product, &page.body);
        info!("{} index lists {} releases", product, found.len());
        releases.extend(found);
    }
    Ok(releases)
}

/// Extract releases from a product's index page.
///
/// Link text is normally `{product}_{version}`; the product prefix is stripped
/// when present, otherwise the whole text is taken as the version. Trailing
/// slashes from directory listings are dropped, and text that could not name
/// a cache entry is skipped.
pub fn parse_index(product: &str, html: &str) -> Vec<ReleaseKey> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let prefix = format!("{}_", product);

    document
        .select(&selector)
        .filter_map(|link| {
            let text = link.text().collect::<String>();
            let text = text.trim().trim_end_matches('/');
            if text.is_empty() || text.contains(PARENT_MARKER) {
                return None;
            }
            let version = text.strip_prefix(&prefix).unwrap_or(text);
            let key = ReleaseKey::new(product, version);
            if !key.is_path_safe() {
                debug!("Skipping index entry {:?}", text);
                return None;
            }
            Some(key)
        })
        .collect()
}
