//! Query normalisation: raw user text to a search-ready query string.
//!
//! Lower-cases the text, guarantees a media-type keyword is present
//! (appending the default genre word when none is), and joins words with
//! `+` so the result can be embedded in a search URL query parameter.

use std::fmt;

/// Media-type keywords recognised in user queries, matched as substrings
/// of the lower-cased text ("анимэ" is the common alternate spelling of
/// "аниме"; "мульт" also covers "мультфильм" and "мультсериал").
const GENRE_KEYWORDS: &[&str] = &["фильм", "сериал", "аниме", "анимэ", "мульт"];

/// Appended once when no genre keyword is present.
const DEFAULT_GENRE: &str = "фильм";

/// A lower-cased, keyword-augmented, URL-query-ready search query.
///
/// Immutable and request-scoped. Construction is a total function: every
/// string, including the empty one, produces a usable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    /// Normalise raw user text.
    ///
    /// Whitespace of any kind collapses to single `+` joins. If none of the
    /// genre keywords occurs in the lower-cased text, the default genre word
    /// is appended as a final query word, exactly once. Empty or
    /// whitespace-only input therefore yields just the default keyword.
    pub fn from_raw(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let has_genre = GENRE_KEYWORDS.iter().any(|kw| lowered.contains(kw));

        let mut words: Vec<&str> = lowered.split_whitespace().collect();
        if !has_genre {
            words.push(DEFAULT_GENRE);
        }
        Self(words.join("+"))
    }

    /// The query string, ready for a `q=` parameter.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
