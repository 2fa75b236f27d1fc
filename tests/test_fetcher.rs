//! Page fetching and pagination URL tests.

mod common;

use common::{cards, Fixture, PageReply, QueryFixture};
use pauperfall::search::{page_url, search_url, total_pages, PageFetcher, PageOutcome};

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

#[test]
fn search_url_encodes_query() {
    let url = search_url("https://api.scryfall.com", "island legal:pauper").unwrap();
    assert_eq!(url.path(), "/cards/search");
    let q: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(q, vec![("q".to_string(), "island legal:pauper".to_string())]);
}

#[test]
fn search_url_tolerates_trailing_slash_and_prefix() {
    let url = search_url("http://localhost:8080/api/", "bolt").unwrap();
    assert_eq!(url.path(), "/api/cards/search");
}

#[test]
fn search_url_rejects_garbage_base() {
    assert!(search_url("not a url", "bolt").is_err());
}

#[test]
fn page_url_replaces_page_in_place() {
    let url = page_url(
        "https://api.scryfall.com/cards/search?format=json&page=2&q=legal%3Apauper",
        5,
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.scryfall.com/cards/search?format=json&page=5&q=legal%3Apauper"
    );
}

#[test]
fn page_url_appends_missing_page() {
    let url = page_url("https://api.scryfall.com/cards/search?q=bolt", 3).unwrap();
    assert_eq!(url.as_str(), "https://api.scryfall.com/cards/search?q=bolt&page=3");
}

#[test]
fn page_url_drops_duplicate_page_params() {
    let url = page_url("https://example.com/s?page=2&q=x&page=9", 4).unwrap();
    assert_eq!(url.as_str(), "https://example.com/s?page=4&q=x");
}

#[test]
fn page_url_rejects_invalid_template() {
    assert!(page_url("::::", 2).is_err());
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(175, 175), 1);
    assert_eq!(total_pages(175, 176), 2);
    assert_eq!(total_pages(175, 400), 3);
    assert_eq!(total_pages(10, 0), 1);
}

#[test]
fn total_pages_guards_empty_first_page() {
    assert_eq!(total_pages(0, 0), 1);
    assert_eq!(total_pages(0, 500), 1);
}

// ---------------------------------------------------------------------------
// PageFetcher against the fixture server
// ---------------------------------------------------------------------------

async fn fetch(fixture: &Fixture, q: &str) -> PageOutcome {
    let fetcher = PageFetcher::new(reqwest::Client::new());
    let url = search_url(&fixture.base, q).unwrap();
    fetcher.fetch(&url).await
}

#[tokio::test]
async fn fetches_and_parses_page() {
    let fixture = Fixture::builder()
        .query(
            "bolt",
            QueryFixture::pages(vec![
                PageReply::Cards(cards("a", 3)),
                PageReply::Cards(cards("b", 2)),
            ]),
        )
        .spawn()
        .await;

    let PageOutcome::Page(page) = fetch(&fixture, "bolt").await else {
        panic!("expected a page");
    };
    assert_eq!(page.cards.len(), 3);
    assert_eq!(page.total_count, 5);
    assert!(page.has_next);
    let next = page.next_page_url.unwrap();
    assert!(next.contains("page=2"), "{next}");
}

#[tokio::test]
async fn last_page_has_no_next() {
    let fixture = Fixture::builder()
        .query("bolt", QueryFixture::single(cards("a", 2)))
        .spawn()
        .await;

    let PageOutcome::Page(page) = fetch(&fixture, "bolt").await else {
        panic!("expected a page");
    };
    assert!(!page.has_next);
    assert!(page.next_page_url.is_none());
}

#[tokio::test]
async fn not_found_means_no_matches() {
    let fixture = Fixture::builder().spawn().await;
    assert_eq!(fetch(&fixture, "nothing").await, PageOutcome::NoMatches);
}

#[tokio::test]
async fn server_error_is_failure() {
    let fixture = Fixture::builder()
        .query("bolt", QueryFixture::pages(vec![PageReply::Status(500)]))
        .spawn()
        .await;
    assert!(matches!(fetch(&fixture, "bolt").await, PageOutcome::Failed(_)));
}

#[tokio::test]
async fn unparseable_body_is_failure() {
    let fixture = Fixture::builder()
        .query("bolt", QueryFixture::pages(vec![PageReply::Garbage]))
        .spawn()
        .await;
    assert!(matches!(fetch(&fixture, "bolt").await, PageOutcome::Failed(_)));
}

#[tokio::test]
async fn unreachable_host_is_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = PageFetcher::new(reqwest::Client::new());
    let url = search_url(&format!("http://{addr}"), "bolt").unwrap();
    assert!(matches!(fetcher.fetch(&url).await, PageOutcome::Failed(_)));
}
