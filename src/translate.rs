//! Pluggable text translation for film metadata.
//!
//! Detail sites serve English titles and synopses; replies go out in
//! Russian. The [`Translate`] trait is the seam: the lookup pipeline only
//! ever talks to the trait, so tests can substitute a canned translator
//! and deployments can swap the backing service without touching the
//! pipeline.

use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use serde_json::Value;

/// A text translation backend.
///
/// Implementations translate between the language pair they were
/// configured with. All implementations must be `Send + Sync` so the
/// pipeline can run translations concurrently.
pub trait Translate: Send + Sync {
    /// Translate `text` from the source to the target language.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError`] if the backend is unreachable or returns a
    /// response that cannot be interpreted.
    fn translate(&self, text: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Translator backed by the public Google translate endpoint.
///
/// Sends `client=gtx` requests and reassembles the translation from the
/// segment array in the JSON response. No API key is involved, which also
/// means no delivery guarantees; callers treat failures as a missing
/// translation, not a fatal condition.
#[derive(Debug)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    source: String,
    target: String,
}

impl HttpTranslator {
    /// Build a translator for the configured endpoint and language pair.
    pub fn new(client: reqwest::Client, config: &ScoutConfig) -> Self {
        Self {
            client,
            endpoint: config.translate_endpoint.clone(),
            source: config.translate_source.clone(),
            target: config.translate_target.clone(),
        }
    }
}

impl Translate for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        tracing::trace!(chars = text.len(), "translating text");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("translation request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("translation HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("translation response read failed: {e}")))?;

        let body: Value = serde_json::from_str(&body)
            .map_err(|e| ScoutError::Translation(format!("response was not JSON: {e}")))?;

        parse_translation(&body)
    }
}

/// Reassemble the translated text from the endpoint's segment array.
///
/// The response is a nested array whose first element holds one entry per
/// translated sentence, each entry leading with the translated piece.
/// Entries without a text piece are skipped.
pub(crate) fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ScoutError::Translation("unexpected response shape".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    Ok(translated)
}
