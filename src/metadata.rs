//! Film metadata lookup: search, follow the detail link, scrape, translate.
//!
//! The flow is two hops. First a search-results page is fetched with the
//! detail-site qualifier added to the query, and the first anchor linking
//! into the detail site is taken. Then the detail page itself is scraped:
//! the title comes from the description meta tag (text before the first
//! colon), and the synopsis, rating and poster come from the page's first
//! `ld+json` structured-data block. The synopsis is translated before the
//! record is returned; the title stays as the detail site wrote it.

use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::query::NormalizedQuery;
use crate::search;
use crate::translate::Translate;
use crate::types::MediaRecord;
use scraper::{Html, Selector};
use serde_json::Value;

/// Raw English-language fields scraped from a film detail page.
///
/// Every field is required. A page missing any of them fails the whole
/// lookup rather than producing a partial record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailPage {
    pub(crate) title: String,
    pub(crate) synopsis: String,
    pub(crate) rating: f64,
    pub(crate) poster_url: String,
}

/// Look up film metadata for a normalised query.
///
/// # Errors
///
/// Any failed hop is an error: the search fetch, the absence of a detail
/// link among the results, the detail fetch, the scrape, or translation.
/// Callers decide whether that degrades to a not-found record.
pub(crate) async fn fetch_metadata<T: Translate>(
    client: &reqwest::Client,
    config: &ScoutConfig,
    translator: &T,
    query: &NormalizedQuery,
) -> Result<MediaRecord> {
    let url = search::search_url(config, query, Some(&config.detail_site_qualifier));
    let html = search::fetch_html(client, &url).await?;
    let hrefs = search::extract_hrefs(&html)?;

    let detail_url = hrefs
        .iter()
        .find(|href| href.contains(config.detail_link_pattern.as_str()))
        .ok_or_else(|| {
            ScoutError::NotFound(format!(
                "no {} link among search results",
                config.detail_link_pattern
            ))
        })?;

    tracing::debug!(url = %detail_url, "following detail link");

    let detail_html = search::fetch_html(client, detail_url).await?;
    let page = parse_detail_page(&detail_html)?;

    let synopsis = translator
        .translate(&decode_apostrophes(&page.synopsis))
        .await?;

    Ok(MediaRecord {
        title: Some(page.title),
        synopsis: Some(synopsis),
        rating: Some(page.rating),
        poster_url: Some(page.poster_url),
    })
}

/// Scrape the required fields out of a detail page.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_detail_page(html: &str) -> Result<DetailPage> {
    let document = Html::parse_document(html);

    let title = extract_meta_title(&document)?;
    let (synopsis, rating, poster_url) = extract_structured_data(&document)?;

    tracing::debug!(title = %title, rating, "detail page parsed");

    Ok(DetailPage {
        title,
        synopsis,
        rating,
        poster_url,
    })
}

/// Title from the description meta tag.
///
/// The tag reads like `Title: Directed by ...`; the text before the first
/// colon is the title. A content string without a colon is used whole.
fn extract_meta_title(document: &Html) -> Result<String> {
    let meta_sel = Selector::parse(r#"meta[name="description"]"#)
        .map_err(|e| ScoutError::Parse(format!("invalid meta selector: {e:?}")))?;

    let content = document
        .select(&meta_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .ok_or_else(|| ScoutError::Parse("detail page has no description meta tag".to_string()))?;

    let title = content.split(':').next().unwrap_or(content);
    Ok(title.to_string())
}

/// Synopsis, rating and poster URL from the first `ld+json` block.
fn extract_structured_data(document: &Html) -> Result<(String, f64, String)> {
    let script_sel = Selector::parse(r#"script[type="application/ld+json"]"#)
        .map_err(|e| ScoutError::Parse(format!("invalid script selector: {e:?}")))?;

    let raw = document
        .select(&script_sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| ScoutError::Parse("detail page has no ld+json block".to_string()))?;

    let data: Value = serde_json::from_str(&raw)
        .map_err(|e| ScoutError::Parse(format!("ld+json is not valid JSON: {e}")))?;

    let synopsis = data
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| ScoutError::Parse("ld+json has no description".to_string()))?
        .to_string();

    let poster_url = data
        .get("image")
        .and_then(Value::as_str)
        .ok_or_else(|| ScoutError::Parse("ld+json has no image".to_string()))?
        .to_string();

    let rating = data
        .get("aggregateRating")
        .and_then(|agg| agg.get("ratingValue"))
        .and_then(rating_value)
        .ok_or_else(|| ScoutError::Parse("ld+json has no aggregate rating".to_string()))?;

    Ok((synopsis, rating, poster_url))
}

/// Rating values appear both as JSON numbers and as quoted strings.
fn rating_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Detail sites leave `&apos;` entities inside their embedded JSON.
fn decode_apostrophes(text: &str) -> String {
    text.replace("&apos;", "'")
}
