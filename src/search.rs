//! Shared search-page plumbing: URL construction, page fetch, anchor scan.
//!
//! Both lookup paths (film metadata and streaming links) start from the
//! same public search-results page; this module owns the one way we build
//! those URLs, download them, and pull candidate links out of the HTML.

use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::query::NormalizedQuery;
use scraper::{Html, Selector};

/// Build a search-results URL for a normalised query.
///
/// The query is embedded verbatim so its `+` word joins survive; reqwest
/// percent-encodes any non-ASCII bytes at request time but leaves `+`
/// alone. When `qualifier` is given it is joined to the query as one more
/// `+`-separated term, steering results toward the detail site.
pub(crate) fn search_url(
    config: &ScoutConfig,
    query: &NormalizedQuery,
    qualifier: Option<&str>,
) -> String {
    match qualifier {
        Some(site) => format!("{}?q={}+{}", config.search_base_url, query.as_str(), site),
        None => format!("{}?q={}", config.search_base_url, query.as_str()),
    }
}

/// Fetch a page and return its body as text.
///
/// Used for search-results pages and film detail pages alike. Non-2xx
/// statuses are errors; callers decide how far the failure propagates.
pub(crate) async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String> {
    tracing::trace!(url, "fetching page");

    let response = client
        .get(url)
        .header("Accept-Language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
        .send()
        .await
        .map_err(|e| ScoutError::Http(format!("request failed: {e}")))?
        .error_for_status()
        .map_err(|e| ScoutError::Http(format!("HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| ScoutError::Http(format!("response read failed: {e}")))?;

    tracing::trace!(bytes = html.len(), "page received");
    Ok(html)
}

/// Extract every anchor `href` from a page, in document order.
///
/// Anchors without an `href` attribute never match the selector. No
/// deduplication happens here; callers own the matching policy.
pub(crate) fn extract_hrefs(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let anchor_sel = Selector::parse("a[href]")
        .map_err(|e| ScoutError::Parse(format!("invalid anchor selector: {e:?}")))?;

    let hrefs: Vec<String> = document
        .select(&anchor_sel)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect();

    tracing::debug!(count = hrefs.len(), "anchors extracted");
    Ok(hrefs)
}
