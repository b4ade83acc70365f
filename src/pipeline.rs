//! The film lookup pipeline: normalise, fetch concurrently, render, persist.
//!
//! [`KinoScout`] is the crate's service entry point. One call to
//! [`KinoScout::answer`] takes raw user text and returns the complete
//! HTML reply; every failure along the way degrades to a fallback
//! section of that reply instead of surfacing to the caller.

use std::sync::Arc;

use crate::config::ScoutConfig;
use crate::error::Result;
use crate::format;
use crate::http;
use crate::links;
use crate::metadata;
use crate::query::NormalizedQuery;
use crate::search;
use crate::store::SuggestionStore;
use crate::translate::{HttpTranslator, Translate};
use crate::types::{MediaRecord, SiteLink, SuggestionCount};

/// Film lookup service.
///
/// Owns the HTTP client, the translator and the suggestion store; cheap
/// to share behind an `Arc`. The translator is a type parameter so hosts
/// and tests can inject their own [`Translate`] implementation.
#[derive(Debug)]
pub struct KinoScout<T = HttpTranslator> {
    config: ScoutConfig,
    client: reqwest::Client,
    translator: T,
    store: Arc<SuggestionStore>,
}

impl KinoScout<HttpTranslator> {
    /// Build the service with the stock HTTP translator.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid, the HTTP
    /// client cannot be constructed, or the database cannot be opened.
    pub fn new(config: ScoutConfig) -> Result<Self> {
        config.validate()?;
        let client = http::build_client(&config)?;
        let translator = HttpTranslator::new(client.clone(), &config);
        Self::assemble(config, client, translator)
    }
}

impl<T: Translate> KinoScout<T> {
    /// Build the service with a caller-supplied translator.
    pub fn with_translator(config: ScoutConfig, translator: T) -> Result<Self> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Self::assemble(config, client, translator)
    }

    fn assemble(config: ScoutConfig, client: reqwest::Client, translator: T) -> Result<Self> {
        let store = Arc::new(SuggestionStore::open(&config.db_path)?);
        Ok(Self {
            config,
            client,
            translator,
            store,
        })
    }

    /// Answer a film query with a ready-to-send HTML reply.
    ///
    /// # Pipeline
    ///
    /// 1. Normalise the raw text into a search query
    /// 2. Run the metadata lookup and the link lookup concurrently
    /// 3. Degrade each failure to its fallback (not-found record, no
    ///    links), logging it at warn level
    /// 4. Render the reply
    /// 5. When a film was found, persist the suggestion and the raw
    ///    request text; storage failures are logged and never alter the
    ///    reply
    ///
    /// Total: every input produces a non-empty reply, and no error
    /// escapes this method.
    pub async fn answer(&self, raw_text: &str, user: &str) -> String {
        let query = NormalizedQuery::from_raw(raw_text);
        tracing::debug!(user, query = %query, "answering film query");

        let metadata =
            metadata::fetch_metadata(&self.client, &self.config, &self.translator, &query);
        let links = self.collect_links(&query);
        let (metadata, links) = futures::future::join(metadata, links).await;

        let record = match metadata {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "metadata lookup failed, replying with not-found");
                MediaRecord::not_found()
            }
        };

        let links = match links {
            Ok(links) => links,
            Err(err) => {
                tracing::warn!(error = %err, "link lookup failed, replying without links");
                Vec::new()
            }
        };

        let reply = format::render_reply(&record, &links);

        if let Some(title) = &record.title {
            self.persist(user, raw_text, title).await;
        }

        reply
    }

    /// A user's recorded search requests, oldest first.
    ///
    /// Render with [`format::render_history`].
    pub fn history(&self, user: &str) -> Result<Vec<String>> {
        self.store.requests(user)
    }

    /// A user's suggestion counters, unordered.
    ///
    /// Render with [`format::render_stats`].
    pub fn stats(&self, user: &str) -> Result<Vec<SuggestionCount>> {
        self.store.suggestions(user)
    }

    /// Fetch the plain search page and collect allow-listed links.
    async fn collect_links(&self, query: &NormalizedQuery) -> Result<Vec<SiteLink>> {
        let url = search::search_url(&self.config, query, None);
        let html = search::fetch_html(&self.client, &url).await?;
        let hrefs = search::extract_hrefs(&html)?;
        Ok(links::collect_site_links(&hrefs, &self.config.allowed_sites))
    }

    /// Record the suggested film and the request off the async runtime.
    ///
    /// Runs on the blocking pool since `rusqlite` is synchronous. Any
    /// failure is logged and swallowed; the reply was already rendered.
    async fn persist(&self, user: &str, request: &str, film: &str) {
        let store = Arc::clone(&self.store);
        let user = user.to_string();
        let request = request.to_string();
        let film = film.to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            store.record_suggestion(&user, &film)?;
            store.record_request(&user, &request)
        })
        .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(error = %err, "failed to persist suggestion"),
            Err(err) => tracing::warn!(error = %err, "persistence task failed"),
        }
    }
}
