//! Integration tests for MeritPath
//!
//! These tests drive the citers page end to end: auth gate, data source,
//! query engine and view.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use meritpath::auth::{AuthGate, PresenceValidator, SessionValidator};
use meritpath::config::load_config;
use meritpath::models::{QueryState, SortDirection, SortKey};
use meritpath::page::{CitersPage, CitersTable, Gated, PageView, Redirect, TableCommand};
use meritpath::sources::{sample_citers, FixtureSource, JsonFileSource, MockSource};
use meritpath::ui;
use std::io::Write;
use std::sync::Arc;

fn fixture_page() -> CitersPage {
    let gate = AuthGate::new("proj", Arc::new(PresenceValidator::new()));
    CitersPage::new(gate, Arc::new(FixtureSource::new()))
}

fn cookie(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
    headers
}

fn signed_in() -> HeaderMap {
    cookie("theme=dark; sb-proj-auth-token=abc")
}

async fn render(page: &CitersPage, headers: &HeaderMap, state: &QueryState) -> PageView {
    match page.handle(headers, state).await.unwrap() {
        Gated::Granted(view) => view,
        Gated::Redirect(redirect) => panic!("unexpected redirect to {}", redirect.destination),
    }
}

#[tokio::test]
async fn test_default_view() {
    let view = render(&fixture_page(), &signed_in(), &QueryState::default()).await;

    assert_eq!(view.title, "Shortlist Potential Citers");
    assert_eq!(view.logged_in_as, "John Researcher");
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.rows[0].citation_count, 342);
    assert_eq!(view.rows[0].detail_path, "/citers/1");

    let counts: Vec<u64> = view.rows.iter().map(|r| r.citation_count).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));

    let caption = view.caption.unwrap();
    assert_eq!(caption.entries_text(), "Showing 10 of 15 entries");
    assert_eq!(caption.total_citations, 2468);

    let pagination = view.pagination.unwrap();
    assert_eq!(pagination.page_text(), "Page 1 of 2");
    assert!(pagination.previous_disabled);
    assert!(!pagination.next_disabled);
}

#[tokio::test]
async fn test_search_university() {
    let state = QueryState::new().search_text("university");
    let view = render(&fixture_page(), &signed_in(), &state).await;

    assert_eq!(view.caption.unwrap().matched, 12);
    assert_eq!(view.rows.len(), 10);
    assert!(view
        .rows
        .iter()
        .all(|r| r.affiliation.to_lowercase().contains("university")));
}

#[tokio::test]
async fn test_search_without_matches() {
    let state = QueryState::new().search_text("zzz");
    let view = render(&fixture_page(), &signed_in(), &state).await;

    assert!(view.no_results);
    assert!(view.rows.is_empty());
    assert!(view.caption.is_none());
    assert!(view.pagination.is_none());
}

#[tokio::test]
async fn test_page_past_end_shows_last_page() {
    let state = QueryState::new().search_text("mit").page_index(2);
    let view = render(&fixture_page(), &signed_in(), &state).await;

    assert!(!view.no_results);
    assert_eq!(view.rows.len(), 2);
    let pagination = view.pagination.as_ref().unwrap();
    assert_eq!(pagination.page_text(), "Page 1 of 1");
    assert!(pagination.previous_disabled);
    assert!(pagination.next_disabled);
    assert!(ui::render_plain(&view).contains("Page 1 of 1"));
}

#[tokio::test]
async fn test_name_sort_ascending() {
    let state = QueryState::new().sort(SortKey::Name, SortDirection::Ascending);
    let view = render(&fixture_page(), &signed_in(), &state).await;

    assert_eq!(view.rows[0].name, "Dr. Ava Williams");
    assert_eq!(view.columns[0].title(), "Name ↑");
}

#[tokio::test]
async fn test_unauthenticated_redirect() {
    let source = Arc::new(MockSource::with_citers(sample_citers()));
    let gate = AuthGate::new("proj", Arc::new(PresenceValidator::new()));
    let page = CitersPage::new(gate, source.clone());

    for headers in [
        HeaderMap::new(),
        cookie("sb-other-auth-token=abc"),
        cookie("sb-proj-auth-token="),
    ] {
        let response = page.handle(&headers, &QueryState::default()).await.unwrap();
        assert_eq!(
            response,
            Gated::Redirect(Redirect {
                destination: "/login".to_string(),
                permanent: false,
            })
        );
    }

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_chunked_cookie_authenticates() {
    let view = render(
        &fixture_page(),
        &cookie("sb-proj-auth-token.0=ab; sb-proj-auth-token.1=cd"),
        &QueryState::default(),
    )
    .await;
    assert_eq!(view.logged_in_as, "John Researcher");
}

#[tokio::test]
async fn test_session_cookie() {
    let gate = AuthGate::new("proj", Arc::new(SessionValidator::new()));
    let page = CitersPage::new(gate, Arc::new(FixtureSource::new()));

    let live = r#"{"access_token":"jwt","expires_at":4102444800,"user":{"id":"u-1","user_metadata":{"full_name":"Ada Lovelace"}}}"#;
    let headers = cookie(&format!(
        "sb-proj-auth-token=base64-{}",
        URL_SAFE_NO_PAD.encode(live)
    ));
    let view = render(&page, &headers, &QueryState::default()).await;
    assert_eq!(view.logged_in_as, "Ada Lovelace");

    let expired = r#"{"access_token":"jwt","expires_at":1000,"user":{"id":"u-1"}}"#;
    let headers = cookie(&format!(
        "sb-proj-auth-token=base64-{}",
        URL_SAFE_NO_PAD.encode(expired)
    ));
    let response = page.handle(&headers, &QueryState::default()).await.unwrap();
    assert!(matches!(response, Gated::Redirect(_)));
}

#[tokio::test]
async fn test_interactive_table() {
    let opened = fixture_page()
        .open_table(&signed_in(), QueryState::new().page_size(5))
        .await
        .unwrap();
    let Gated::Granted((user, mut table)) = opened else {
        panic!("expected an open table");
    };

    for line in ["next", "next", "next"] {
        line.parse::<TableCommand>().unwrap().apply(&mut table);
    }
    assert_eq!(table.state().page_index, 3);
    assert_eq!(table.result().page.len(), 5);

    "size 20".parse::<TableCommand>().unwrap().apply(&mut table);
    assert_eq!(table.state().page_index, 1);
    assert_eq!(table.result().total_pages, 1);

    let view = PageView::build(&user, table.state(), table.result());
    assert_eq!(view.rows.len(), 15);
    assert!(view.pagination.unwrap().next_disabled);
}

#[test]
fn test_table_clamps_out_of_range_page() {
    let table = CitersTable::new(sample_citers(), QueryState::new().page_size(5).page_index(4));
    assert_eq!(table.state().page_index, 3);
    assert_eq!(table.result().page.len(), 5);
}

#[tokio::test]
async fn test_json_file_source_page() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "a", "name": "Émile Borel", "affiliation": "Sorbonne", "citationCount": 12}},
            {{"id": "b", "name": "Ada Lovelace", "university": "London", "totalCitations": 40}},
            {{"id": "c", "name": "Zed Zhao", "affiliation": "Tsinghua University", "citationCount": 12}}
        ]"#
    )
    .unwrap();

    let gate = AuthGate::new("proj", Arc::new(PresenceValidator::new()));
    let page = CitersPage::new(gate, Arc::new(JsonFileSource::new(file.path())));

    let state = QueryState::new().sort(SortKey::Name, SortDirection::Ascending);
    let view = render(&page, &signed_in(), &state).await;
    let names: Vec<&str> = view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Émile Borel", "Zed Zhao"]);
    assert_eq!(view.caption.unwrap().total_citations, 64);

    let detail = page.detail(&signed_in(), "b").await.unwrap();
    assert!(matches!(detail, Gated::Granted(c) if c.affiliation == "London"));
}

#[tokio::test]
async fn test_page_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("citers.json");
    std::fs::write(
        &data,
        r#"[{"id": "x", "name": "Grace Hopper", "affiliation": "Yale University", "citationCount": 7}]"#,
    )
    .unwrap();

    let config_path = dir.path().join("meritpath.toml");
    std::fs::write(
        &config_path,
        format!(
            "[auth]\nproject_ref = \"cfgref\"\nlogin_path = \"/signin\"\n\n[data]\nciters_file = {:?}\n",
            data.to_string_lossy()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let page = CitersPage::from_config(&config).unwrap();
    assert_eq!(page.gate().cookie_name(), "sb-cfgref-auth-token");

    let denied = page
        .handle(&HeaderMap::new(), &QueryState::default())
        .await
        .unwrap();
    assert!(matches!(denied, Gated::Redirect(r) if r.destination == "/signin"));

    let view = render(&page, &cookie("sb-cfgref-auth-token=t"), &QueryState::default()).await;
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "Grace Hopper");

    let rendered = ui::render_plain(&view);
    assert!(rendered.contains("Grace Hopper - Yale University (7 citations)"));
}
