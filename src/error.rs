//! Error types for the kinoscout crate.
//!
//! All errors use stable string messages suitable for logging and
//! programmatic handling. Lookup errors never reach callers of
//! [`crate::KinoScout::answer`]; they are collapsed into not-found
//! sentinels inside the pipeline.

/// Errors that can occur during film lookup and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// An HTTP request to the search provider or a detail page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a fetched page or an embedded data block.
    #[error("parse error: {0}")]
    Parse(String),

    /// No result link matched the detail-site pattern.
    #[error("no detail page found: {0}")]
    NotFound(String),

    /// The translation capability failed or returned an unusable payload.
    #[error("translation error: {0}")]
    Translation(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),

    /// SQLite storage error.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The store connection mutex was poisoned.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Convenience type alias for kinoscout results.
pub type Result<T> = std::result::Result<T, ScoutError>;
