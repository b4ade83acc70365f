//! Lookup configuration with sensible defaults.
//!
//! [`ScoutConfig`] controls the search provider endpoint, the detail site
//! used for metadata, the streaming-site allow-list, translation languages
//! and request behaviour. The defaults reproduce the reference deployment:
//! Google search results, IMDB detail pages, Russian reply language.

use std::path::PathBuf;

use url::Url;

use crate::error::ScoutError;

/// Streaming-site domain fragments eligible for link collection.
///
/// A result link binds a site when the fragment is a substring of its
/// href. Order is irrelevant; binding order follows the result page.
pub(crate) const DEFAULT_ALLOWED_SITES: &[&str] = &[
    "kinopoisk.ru",
    "ivi.ru",
    "okko",
    "more.tv",
    "kion",
    "wink.ru",
    "lordfilm",
    "animego",
    "film.ru",
    "amediateka",
    "shikimori",
    "ani.best",
    "jut-su",
    "ururuanime",
    "lordserials",
];

/// Configuration for a [`crate::KinoScout`] instance.
///
/// Use [`Default::default()`] for the reference setup, or construct with
/// field overrides for custom behaviour (tests point the endpoints at a
/// mock server).
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Search provider endpoint; queried as `{search_base_url}?q={query}`.
    pub search_base_url: String,
    /// Suffix appended to the metadata search query to bias results
    /// toward the detail site.
    pub detail_site_qualifier: String,
    /// Substring a result href must contain to count as a detail page link.
    pub detail_link_pattern: String,
    /// Streaming-site domain fragments eligible for link collection.
    pub allowed_sites: Vec<String>,
    /// Translation endpoint (gtx-style `translate_a/single`).
    pub translate_endpoint: String,
    /// Language the detail site writes synopses in.
    pub translate_source: String,
    /// Language replies are written in.
    pub translate_target: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// SQLite database file for the history/stats store.
    pub db_path: PathBuf,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            search_base_url: "https://www.google.com/search".into(),
            detail_site_qualifier: "imdb.com".into(),
            detail_link_pattern: "https://www.imdb.com".into(),
            allowed_sites: DEFAULT_ALLOWED_SITES.iter().map(|s| s.to_string()).collect(),
            translate_endpoint: "https://translate.googleapis.com/translate_a/single".into(),
            translate_source: "en".into(),
            translate_target: "ru".into(),
            timeout_seconds: 8,
            user_agent: None,
            db_path: PathBuf::from("kinoscout.db"),
        }
    }
}

impl ScoutConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `search_base_url` and `translate_endpoint` must parse as URLs
    /// - `detail_site_qualifier` and `detail_link_pattern` must be non-empty
    /// - `allowed_sites` must not be empty
    /// - `translate_source` and `translate_target` must be non-empty
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), ScoutError> {
        if Url::parse(&self.search_base_url).is_err() {
            return Err(ScoutError::Config(format!(
                "search_base_url is not a valid URL: {}",
                self.search_base_url
            )));
        }
        if Url::parse(&self.translate_endpoint).is_err() {
            return Err(ScoutError::Config(format!(
                "translate_endpoint is not a valid URL: {}",
                self.translate_endpoint
            )));
        }
        if self.detail_site_qualifier.is_empty() {
            return Err(ScoutError::Config(
                "detail_site_qualifier must not be empty".into(),
            ));
        }
        if self.detail_link_pattern.is_empty() {
            return Err(ScoutError::Config(
                "detail_link_pattern must not be empty".into(),
            ));
        }
        if self.allowed_sites.is_empty() {
            return Err(ScoutError::Config(
                "at least one allowed site is required".into(),
            ));
        }
        if self.translate_source.is_empty() || self.translate_target.is_empty() {
            return Err(ScoutError::Config(
                "translation languages must not be empty".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
