//! Reply rendering: film metadata and links to Telegram-flavoured HTML.
//!
//! Pure string transforms, no I/O. The markup uses exactly three
//! primitives the chat clients understand: a bold span, a visible
//! hyperlink, and an invisible hyperlink that only exists to trigger the
//! client's preview card. Fixed message fragments are exported so callers
//! can recognise them in replies.

use crate::types::{MediaRecord, SiteLink, SuggestionCount};

/// Complete reply for a query no film could be matched to.
pub const NOT_FOUND_REPLY: &str = "<b>Я не смог найти фильма с таким названием</b> 😔\n";

/// Fragment used in place of a missing synopsis.
pub const NO_SYNOPSIS_NOTE: &str = "<b>Описание я найти не смог</b>";

/// Header above the collected streaming links.
pub const LINKS_HEADER: &str = "<b>Ссылки, где можно посмотреть:</b>";

/// Fragment used when no streaming link was collected.
pub const NO_LINKS_NOTE: &str = "<b>Ссылок, где посмотреть, я не нашел</b> 😔";

/// Complete reply for a user with no recorded requests.
pub const EMPTY_HISTORY_REPLY: &str =
    "<b>Кажется ты еще ничего у меня не спрашивал, не так ли? 😉</b>";

/// Header above the request history listing.
pub const HISTORY_HEADER: &str = "<b>Вот какие фильмы я помогал тебе искать:</b>";

/// Complete reply for a user with no recorded suggestions.
pub const EMPTY_STATS_REPLY: &str =
    "<b>Чтобы показать статистику, я должен тебе предложить хотя бы один фильм 😉</b>";

/// Header above the suggestion statistics listing.
pub const STATS_HEADER: &str = "<b>Вот какие фильмы я предлагал тебе посмотреть:</b>";

/// Render the film reply.
///
/// An absent title short-circuits to [`NOT_FOUND_REPLY`]; nothing else in
/// the record or the links influences that case. Otherwise the sections
/// are emitted in fixed order: invisible poster link, bold title,
/// synopsis (or its fallback), rating line with a mood emoji (omitted
/// entirely when the rating is absent), then the links section (or its
/// fallback). Scraped text is HTML-escaped; URLs are emitted verbatim.
pub fn render_reply(record: &MediaRecord, links: &[SiteLink]) -> String {
    let title = match &record.title {
        Some(title) => title,
        None => return NOT_FOUND_REPLY.to_string(),
    };

    let mut reply = String::new();

    if let Some(poster) = &record.poster_url {
        reply.push_str(&hide_link(poster));
    }

    reply.push_str(&format!("<b>{}</b>\n\n", escape(title)));

    match &record.synopsis {
        Some(synopsis) => {
            reply.push_str(&escape(synopsis));
            reply.push('\n');
        }
        None => {
            reply.push_str(NO_SYNOPSIS_NOTE);
            reply.push('\n');
        }
    }

    if let Some(rating) = record.rating {
        reply.push_str(&format!(
            "\n<b>Оценка:</b> {rating:.1} / 10 {}\n",
            rating_mood(rating)
        ));
    }

    reply.push('\n');
    if links.is_empty() {
        reply.push_str(NO_LINKS_NOTE);
        reply.push('\n');
    } else {
        reply.push_str(LINKS_HEADER);
        reply.push('\n');
        for link in links {
            reply.push_str(&format!(
                "<a href=\"{}\">● {}\n</a>",
                link.url,
                escape(&link.label)
            ));
        }
    }

    reply
}

/// Render a user's request history, numbered from 1 in storage order.
pub fn render_history(requests: &[String]) -> String {
    if requests.is_empty() {
        return EMPTY_HISTORY_REPLY.to_string();
    }

    let mut reply = String::from(HISTORY_HEADER);
    reply.push('\n');
    for (i, request) in requests.iter().enumerate() {
        reply.push_str(&format!("{}) {}\n", i + 1, escape(request)));
    }
    reply
}

/// Render a user's suggestion statistics, most-suggested first.
///
/// Ordering is a presentation concern, so the descending sort happens
/// here rather than in the store. Ties keep their input order.
pub fn render_stats(suggestions: &[SuggestionCount]) -> String {
    if suggestions.is_empty() {
        return EMPTY_STATS_REPLY.to_string();
    }

    let mut ranked: Vec<_> = suggestions.iter().collect();
    ranked.sort_by(|a, b| b.showings.cmp(&a.showings));

    let mut reply = String::from(STATS_HEADER);
    reply.push('\n');
    for (i, entry) in ranked.iter().enumerate() {
        reply.push_str(&format!(
            "{}) {} - {} раз(а)\n",
            i + 1,
            escape(&entry.film),
            entry.showings
        ));
    }
    reply
}

/// Mood emoji for a rating: at most 3 is sad, up to 6.8 neutral,
/// anything above that happy.
fn rating_mood(rating: f64) -> &'static str {
    if rating <= 3.0 {
        "😔"
    } else if rating <= 6.8 {
        "🙂"
    } else {
        "🤩"
    }
}

/// An invisible hyperlink: the anchor text is a word joiner, which
/// renders as nothing while still making the client load a preview card
/// for the URL.
fn hide_link(url: &str) -> String {
    format!("<a href=\"{url}\">&#8288;</a>")
}

/// Escape the characters that would otherwise open markup.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
