//! Core types for film metadata, streaming links and suggestion stats.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for the best-matching title of one request.
///
/// Every field is optional: a failed lookup produces the all-absent
/// sentinel (see [`MediaRecord::not_found`]), and the formatter renders
/// absent fields as fixed fallback text rather than treating them as
/// errors. The record is request-scoped and has no cross-request identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Film title as shown on the detail site.
    pub title: Option<String>,
    /// Synopsis, already translated to the reply language.
    pub synopsis: Option<String>,
    /// Aggregate rating on the detail site's 0 to 10 scale.
    pub rating: Option<f64>,
    /// Poster image URL, used for the invisible preview link.
    pub poster_url: Option<String>,
}

impl MediaRecord {
    /// The all-absent sentinel signalling a failed metadata lookup.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Whether the lookup resolved a title.
    ///
    /// The fetcher never produces a title-less partial record, so this is
    /// equivalent to "the lookup succeeded".
    pub fn is_found(&self) -> bool {
        self.title.is_some()
    }
}

/// One streaming-site link collected from a search result page.
///
/// Collection order is document order of the first matching result link;
/// a site never appears twice in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLink {
    /// Capitalised site label derived from the allow-list fragment.
    pub label: String,
    /// The matching result link, kept verbatim.
    pub url: String,
}

/// How many times one film has been suggested to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCount {
    /// Film title as recorded at suggestion time.
    pub film: String,
    /// Number of times the film was suggested, at least 1.
    pub showings: i64,
}
