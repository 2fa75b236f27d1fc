//! Shared test fixtures for the Pauperfall integration tests.
//!
//! Provides a local stand-in for the search API and the popularity table,
//! served by axum on an ephemeral port. Every search request is recorded so
//! tests can assert what was (or was not) sent upstream.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pauperfall::Pauperfall;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Fixture description
// ---------------------------------------------------------------------------

/// What the fake API answers for one page.
#[derive(Clone)]
pub enum PageReply {
    Cards(Vec<Value>),
    Status(u16),
    Garbage,
}

/// Pages served for one upstream query string.
#[derive(Clone)]
pub struct QueryFixture {
    pub total_cards: u64,
    pub pages: Vec<PageReply>,
    pub delay: Duration,
    pub link_next: bool,
}

impl QueryFixture {
    /// Serve `pages` in order; `total_cards` counts every card listed.
    pub fn pages(pages: Vec<PageReply>) -> Self {
        let total_cards = pages
            .iter()
            .map(|p| match p {
                PageReply::Cards(cards) => cards.len() as u64,
                _ => 0,
            })
            .sum();
        Self {
            total_cards,
            pages,
            delay: Duration::ZERO,
            link_next: true,
        }
    }

    /// A single page holding `cards`.
    pub fn single(cards: Vec<Value>) -> Self {
        Self::pages(vec![PageReply::Cards(cards)])
    }

    pub fn total(mut self, total_cards: u64) -> Self {
        self.total_cards = total_cards;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn without_next_link(mut self) -> Self {
        self.link_next = false;
        self
    }
}

#[derive(Default)]
pub struct FixtureBuilder {
    queries: HashMap<String, QueryFixture>,
    popularity: Option<Value>,
}

impl FixtureBuilder {
    /// Serve `fixture` for the upstream query `q`.
    pub fn query(mut self, q: &str, fixture: QueryFixture) -> Self {
        self.queries.insert(q.to_string(), fixture);
        self
    }

    /// Serve `table` as the popularity table. Without one the endpoint
    /// answers 503.
    pub fn popularity(mut self, table: Value) -> Self {
        self.popularity = Some(table);
        self
    }

    pub async fn spawn(self) -> Fixture {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base = format!("http://{addr}");

        let shared = Arc::new(Shared {
            base: base.clone(),
            queries: self.queries,
            popularity: self.popularity,
            requests: Mutex::new(Vec::new()),
            popularity_hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/cards/search", get(search))
            .route("/popularity.json", get(popularity))
            .with_state(shared.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Fixture { base, shared }
    }
}

// ---------------------------------------------------------------------------
// Running fixture
// ---------------------------------------------------------------------------

struct Shared {
    base: String,
    queries: HashMap<String, QueryFixture>,
    popularity: Option<Value>,
    requests: Mutex<Vec<(String, usize)>>,
    popularity_hits: AtomicUsize,
}

pub struct Fixture {
    pub base: String,
    shared: Arc<Shared>,
}

impl Fixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    pub fn popularity_url(&self) -> String {
        format!("{}/popularity.json", self.base)
    }

    /// A client pointed at this fixture for both search and popularity.
    pub fn client(&self) -> Pauperfall {
        Pauperfall::builder()
            .api_base(&self.base)
            .popularity_source(&self.popularity_url())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    /// Every `(q, page)` search request received so far.
    pub fn search_requests(&self) -> Vec<(String, usize)> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn popularity_hits(&self) -> usize {
        self.shared.popularity_hits.load(Ordering::SeqCst)
    }
}

async fn search(
    State(shared): State<Arc<Shared>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let q = params.get("q").cloned().unwrap_or_default();
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    shared.requests.lock().unwrap().push((q.clone(), page));

    let Some(fixture) = shared.queries.get(&q) else {
        return not_found();
    };
    if !fixture.delay.is_zero() {
        tokio::time::sleep(fixture.delay).await;
    }
    let Some(reply) = fixture.pages.get(page.saturating_sub(1)) else {
        return not_found();
    };

    match reply {
        PageReply::Cards(cards) => {
            let has_more = page < fixture.pages.len();
            let mut body = json!({
                "object": "list",
                "total_cards": fixture.total_cards,
                "has_more": has_more,
                "data": cards,
            });
            if has_more && fixture.link_next {
                let next_page = (page + 1).to_string();
                let next = reqwest::Url::parse_with_params(
                    &format!("{}/cards/search", shared.base),
                    &[
                        ("format", "json"),
                        ("page", next_page.as_str()),
                        ("q", q.as_str()),
                    ],
                )
                .unwrap();
                body["next_page"] = Value::String(next.to_string());
            }
            Json(body).into_response()
        }
        PageReply::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap();
            let body = json!({
                "object": "error",
                "code": "server_error",
                "status": code,
                "details": "fixture failure",
            });
            (status, Json(body)).into_response()
        }
        PageReply::Garbage => (StatusCode::OK, "definitely not json").into_response(),
    }
}

async fn popularity(State(shared): State<Arc<Shared>>) -> Response {
    shared.popularity_hits.fetch_add(1, Ordering::SeqCst);
    match &shared.popularity {
        Some(table) => Json(table.clone()).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

fn not_found() -> Response {
    let body = json!({
        "object": "error",
        "code": "not_found",
        "status": 404,
        "details": "Your query didn't match any cards.",
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Card helpers
// ---------------------------------------------------------------------------

/// A card object shaped like the search API's.
pub fn card(id: &str, name: &str) -> Value {
    json!({
        "object": "card",
        "id": id,
        "name": name,
        "mana_cost": "{U}",
        "type_line": "Instant",
        "rarity": "common",
        "image_uris": {
            "small": format!("https://img.example/{id}/small.jpg"),
            "normal": format!("https://img.example/{id}/normal.jpg"),
        },
        "scryfall_uri": format!("https://scryfall.example/card/{id}"),
    })
}

/// `count` distinct cards named `{prefix} {n}`, with ids `{prefix}-{n}`.
pub fn cards(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| card(&format!("{prefix}-{n}"), &format!("{prefix} {n}")))
        .collect()
}

/// Ids of `cards` in order.
pub fn ids(cards: &[pauperfall::Card]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone()).collect()
}

/// Names of `cards` in order.
pub fn names(cards: &[pauperfall::Card]) -> Vec<String> {
    cards.iter().map(|c| c.name.clone()).collect()
}
