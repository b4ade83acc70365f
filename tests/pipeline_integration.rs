//! End-to-end pipeline tests against a mock HTTP server.
//!
//! Every network surface the pipeline touches is mocked: the search page
//! (both the qualified metadata query and the plain links query), the
//! film detail page, and the translation endpoint. The store writes to a
//! temporary directory. What runs is the production wiring, including
//! the stock HTTP translator.

use kinoscout::format::{NOT_FOUND_REPLY, NO_LINKS_NOTE};
use kinoscout::{KinoScout, ScoutConfig};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LINKS_PAGE: &str = r#"<html><body>
<a href="https://en.wikipedia.org/wiki/Interstellar_(film)">описание</a>
<a href="https://www.kinopoisk.ru/film/258687/">кинопоиск</a>
<a href="https://okko.tv/movie/interstellar">окко</a>
</body></html>"#;

const DETAIL_PAGE: &str = r#"<html><head>
<meta name="description" content="Interstellar: Directed by Christopher Nolan.">
<script type="application/ld+json">{"description":"Cooper&apos;s team crosses a wormhole.","image":"https://images.example/poster.jpg","aggregateRating":{"ratingValue":8.6}}</script>
</head><body></body></html>"#;

fn detail_search_page(server: &MockServer) -> String {
    format!(
        r#"<html><body>
<a href="https://example.com/elsewhere">другой сайт</a>
<a href="{}/title/tt0816692/">Interstellar (2014)</a>
</body></html>"#,
        server.uri()
    )
}

fn scout_config(server: &MockServer, dir: &tempfile::TempDir) -> ScoutConfig {
    ScoutConfig {
        search_base_url: format!("{}/search", server.uri()),
        detail_link_pattern: format!("{}/title", server.uri()),
        translate_endpoint: format!("{}/translate", server.uri()),
        db_path: dir.path().join("scout.db"),
        ..ScoutConfig::default()
    }
}

/// Search mock for the metadata lookup. The qualified query carries the
/// detail-site qualifier, so it is matched first via priority 1.
async fn mount_detail_search(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_contains("q", "imdb.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Search mock for the plain links lookup, matched when the qualified
/// mock does not apply.
async fn mount_links_search(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(template)
        .with_priority(5)
        .mount(server)
        .await;
}

async fn mount_detail_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/title/tt0816692/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .mount(server)
        .await;
}

/// Only the synopsis goes through the translator; the title never does.
async fn mount_translations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/translate"))
        .and(query_param("q", "Cooper's team crosses a wormhole."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [[
                "Команда Купера пересекает червоточину.",
                "Cooper's team crosses a wormhole.",
                null,
                null,
                10
            ]],
            null,
            "en"
        ])))
        .mount(server)
        .await;
}

// ────────────────────────────────────────────────────────────────────────────
// Happy path: film found, links found, both stores updated
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn found_film_renders_full_reply_and_persists() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;
    mount_detail_page(&server).await;
    mount_translations(&server).await;

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    let reply = scout.answer("Интерстеллар", "42").await;

    // Invisible poster link first, then the title exactly as the detail
    // site wrote it; only the synopsis is translated.
    assert!(reply.starts_with("<a href=\"https://images.example/poster.jpg\">&#8288;</a>"));
    assert!(reply.contains("<b>Interstellar</b>"));
    assert!(reply.contains("Команда Купера пересекает червоточину."));
    assert!(reply.contains("<b>Оценка:</b> 8.6 / 10 🤩"));

    // Both allow-listed links, in discovery order; the wiki link is not
    // on the allow-list and must not appear.
    let kinopoisk = reply.find("● Kinopoisk.ru").expect("kinopoisk link");
    let okko = reply.find("● Okko").expect("okko link");
    assert!(kinopoisk < okko);
    assert!(!reply.contains("wikipedia"));

    // The raw request text and the verbatim title were recorded.
    assert_eq!(scout.history("42").expect("history"), vec!["Интерстеллар"]);
    let stats = scout.stats("42").expect("stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].film, "Interstellar");
    assert_eq!(stats[0].showings, 1);
}

#[tokio::test]
async fn repeat_query_dedupes_history_and_bumps_counter() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;
    mount_detail_page(&server).await;
    mount_translations(&server).await;

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    scout.answer("интерстеллар", "42").await;
    scout.answer("интерстеллар", "42").await;
    scout.answer("Интерстеллар", "42").await;

    // History dedups on the exact raw text, so the differently-cased
    // request is its own entry; the suggestion counter sees all three.
    assert_eq!(
        scout.history("42").expect("history"),
        vec!["интерстеллар", "Интерстеллар"]
    );
    assert_eq!(scout.stats("42").expect("stats")[0].showings, 3);
}

/// Prefixes every translation so the test can see exactly which fields
/// went through the translator.
struct MarkingTranslator;

impl kinoscout::Translate for MarkingTranslator {
    async fn translate(&self, text: &str) -> kinoscout::Result<String> {
        Ok(format!("ru:{text}"))
    }
}

#[tokio::test]
async fn title_stays_verbatim_only_synopsis_is_translated() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;
    mount_detail_page(&server).await;

    let scout = KinoScout::with_translator(scout_config(&server, &dir), MarkingTranslator)
        .expect("service should build");
    let reply = scout.answer("интерстеллар", "42").await;

    // The title is never handed to the translator, in the reply or in
    // the recorded stats; the synopsis is, after entity decoding.
    assert!(reply.contains("<b>Interstellar</b>"));
    assert!(!reply.contains("ru:Interstellar"));
    assert!(reply.contains("ru:Cooper's team crosses a wormhole."));
    assert_eq!(scout.stats("42").expect("stats")[0].film, "Interstellar");
}

// ────────────────────────────────────────────────────────────────────────────
// Degradation paths
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_detail_link_returns_not_found_and_skips_stores() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    // The qualified search answers, but nothing on the page links into
    // the detail site. Links would be available.
    mount_detail_search(
        &server,
        r#"<html><body><a href="https://example.com/x">x</a></body></html>"#.to_string(),
    )
    .await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    let reply = scout.answer("интерстеллар", "42").await;

    // Short-circuit: the fixed reply and nothing else, links discarded.
    assert_eq!(reply, NOT_FOUND_REPLY);
    assert!(scout.history("42").expect("history").is_empty());
    assert!(scout.stats("42").expect("stats").is_empty());
}

#[tokio::test]
async fn link_search_failure_degrades_to_no_links_note() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(500)).await;
    mount_detail_page(&server).await;
    mount_translations(&server).await;

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    let reply = scout.answer("интерстеллар", "42").await;

    assert!(reply.contains("<b>Interstellar</b>"));
    assert!(reply.contains(NO_LINKS_NOTE));

    // The film itself was found, so persistence still happens.
    assert_eq!(scout.history("42").expect("history").len(), 1);
    assert_eq!(scout.stats("42").expect("stats").len(), 1);
}

#[tokio::test]
async fn translation_failure_collapses_to_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;
    mount_detail_page(&server).await;
    // No translation mocks: the endpoint 404s and the lookup fails late.

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    let reply = scout.answer("интерстеллар", "42").await;

    assert_eq!(reply, NOT_FOUND_REPLY);
    assert!(scout.history("42").expect("history").is_empty());
    assert!(scout.stats("42").expect("stats").is_empty());
}

#[tokio::test]
async fn unreachable_search_still_produces_a_reply() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    // No mocks at all: every request 404s.

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    let reply = scout.answer("интерстеллар", "42").await;

    assert_eq!(reply, NOT_FOUND_REPLY);
    assert!(scout.history("42").expect("history").is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Per-user isolation through the public surface
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_and_stats_are_per_user() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    mount_detail_search(&server, detail_search_page(&server)).await;
    mount_links_search(&server, ResponseTemplate::new(200).set_body_string(LINKS_PAGE)).await;
    mount_detail_page(&server).await;
    mount_translations(&server).await;

    let scout = KinoScout::new(scout_config(&server, &dir)).expect("service should build");
    scout.answer("интерстеллар", "42").await;

    assert_eq!(scout.history("42").expect("history").len(), 1);
    assert!(scout.history("43").expect("history").is_empty());
    assert!(scout.stats("43").expect("stats").is_empty());
}
