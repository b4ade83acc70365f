//! Streaming-link collection from search-results pages.
//!
//! Scans the anchors of a search page against an allow-list of known
//! streaming-site fragments. Matching is plain substring containment, so
//! one anchor can satisfy several fragments (a `lordfilm.ru` link carries
//! both `lordfilm` and `film.ru`). Each fragment binds to the first anchor
//! that contains it and is then retired, so every site appears at most
//! once in the result.

use crate::types::SiteLink;

/// Collect allow-listed streaming links from anchors, in discovery order.
///
/// For each href, the still-unmatched fragments are checked in list order;
/// every match emits a [`SiteLink`] labelled with the capitalised fragment
/// and removes that fragment from further consideration. Stops early once
/// the allow-list is exhausted.
pub(crate) fn collect_site_links(hrefs: &[String], allowed_sites: &[String]) -> Vec<SiteLink> {
    let mut remaining: Vec<&str> = allowed_sites.iter().map(String::as_str).collect();
    let mut links = Vec::new();

    for href in hrefs {
        remaining.retain(|site| {
            if href.contains(site) {
                links.push(SiteLink {
                    label: capitalize(site),
                    url: href.clone(),
                });
                false
            } else {
                true
            }
        });
        if remaining.is_empty() {
            break;
        }
    }

    tracing::debug!(count = links.len(), "site links collected");
    links
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
