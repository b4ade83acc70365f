//! # kinoscout
//!
//! Zero-configuration film lookup for chat assistants.
//!
//! This crate answers a free-text "what should I watch" query by scraping
//! public search-results pages directly: no API keys and no external
//! services required. It compiles into a chat bot's binary as a library
//! dependency and hands back a ready-to-send HTML reply.
//!
//! ## Design
//!
//! - Normalises the query (lower-case, guaranteed genre keyword) before
//!   searching
//! - Scrapes film metadata (title, synopsis, rating, poster) from the
//!   first detail-site hit, translating it to Russian on the way
//! - Collects streaming links from an allow-list of known sites
//! - Runs both lookups concurrently and degrades gracefully: a failed
//!   lookup becomes a fallback section of the reply, never an error
//! - Records per-user request history and suggestion counters in SQLite
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners; this is a library, not a server
//! - Scraped text is HTML-escaped before it enters the reply markup
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> kinoscout::Result<()> {
//! let scout = kinoscout::KinoScout::new(kinoscout::ScoutConfig::default())?;
//! let reply = scout.answer("интерстеллар", "42").await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod http;
mod links;
mod metadata;
pub mod pipeline;
pub mod query;
mod search;
pub mod store;
pub mod translate;
pub mod types;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
pub use pipeline::KinoScout;
pub use query::NormalizedQuery;
pub use store::SuggestionStore;
pub use translate::{HttpTranslator, Translate};
pub use types::{MediaRecord, SiteLink, SuggestionCount};
