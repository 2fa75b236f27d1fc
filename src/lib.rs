//! Pauperfall: Pauper card search ranked by popularity.
//!
//! Queries the Scryfall search API for Pauper-legal cards, collects every
//! page of the result set, and ranks the cards by how often they appear in
//! Pauper decks ("Pauperlarity"). Ranked results are handed to the
//! presentation layer a page at a time through [`SearchSession`].
//!
//! # Quick start
//!
//! ```no_run
//! use pauperfall::Pauperfall;
//!
//! # async fn example() -> pauperfall::Result<()> {
//! let pf = Pauperfall::builder()
//!     .popularity_source("https://example.com/mtg_pauper_staples.json")
//!     .build()?;
//!
//! let outcome = pf.search("lightning bolt").await;
//! for card in &outcome.cards {
//!     println!("{} {}", card.name, card.detail_url());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod config;
pub mod error;
pub mod models;
pub mod popularity;
pub mod query_builder;
pub mod reveal;
pub mod search;
pub mod session;

#[cfg(feature = "blocking")]
pub use blocking::BlockingPauperfall;
pub use config::{PopularitySource, SearchConfig};
pub use error::{PauperfallError, Result};
pub use models::{Card, ImageUris, PopularityEntry, SearchOutcome};
pub use popularity::PopularityIndex;
pub use query_builder::{EasterEgg, QueryBuilder};
pub use reveal::{grow_reveal, initial_reveal, RevealPhase, RevealState};
pub use session::{SearchSession, SearchTicket};

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};

use search::{rank, PageFetcher, ResultAggregator};

// ---------------------------------------------------------------------------
// PauperfallBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Pauperfall`] instance.
///
/// Use [`Pauperfall::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PauperfallBuilder::build).
#[derive(Default)]
pub struct PauperfallBuilder {
    config: SearchConfig,
}

impl PauperfallBuilder {
    /// Set the base URL of the search API.
    ///
    /// Defaults to `https://api.scryfall.com`.
    pub fn api_base(mut self, base: &str) -> Self {
        self.config.api_base = base.to_string();
        self
    }

    /// Set where the popularity table is read from.
    ///
    /// `http://` and `https://` locations are fetched, anything else is read
    /// as a file path. Defaults to `mtg_pauper_staples.json` in the working
    /// directory.
    pub fn popularity_source(mut self, location: &str) -> Self {
        self.config.popularity_source = PopularitySource::parse(location);
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of cards revealed per step. Defaults to 176.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Replace the mandatory filter tags. Defaults to `legal:pauper`.
    pub fn required_tags(mut self, tags: &[&str]) -> Self {
        self.config.required_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Replace the easter eggs, highest priority first.
    pub fn easter_eggs(mut self, eggs: Vec<EasterEgg>) -> Self {
        self.config.easter_eggs = eggs;
        self
    }

    /// Set the `User-Agent` sent upstream.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    /// Validate the configuration and build the HTTP client.
    pub fn build(self) -> Result<Pauperfall> {
        let config = self.config;
        Url::parse(&config.api_base).map_err(|e| {
            PauperfallError::InvalidArgument(format!("invalid API base {}: {e}", config.api_base))
        })?;
        if config.page_size == 0 {
            return Err(PauperfallError::InvalidArgument(
                "page size must be at least 1".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Pauperfall {
            query_builder: QueryBuilder::new(
                config.required_tags.clone(),
                config.easter_eggs.clone(),
            ),
            fetcher: PageFetcher::new(client.clone()),
            client,
            config,
        })
    }

    /// Build a [`BlockingPauperfall`] for synchronous callers.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<BlockingPauperfall> {
        BlockingPauperfall::new(self.build()?)
    }
}

// ---------------------------------------------------------------------------
// Pauperfall
// ---------------------------------------------------------------------------

/// The main entry point: query rewriting, page aggregation and ranking.
///
/// Created via [`Pauperfall::builder()`]. Cheap to share by reference; every
/// search is independent.
pub struct Pauperfall {
    config: SearchConfig,
    client: Client,
    query_builder: QueryBuilder,
    fetcher: PageFetcher,
}

impl Pauperfall {
    /// Create a new builder with default configuration.
    pub fn builder() -> PauperfallBuilder {
        PauperfallBuilder::default()
    }

    /// Search for cards matching `query`, ranked by popularity.
    ///
    /// Blank input returns an empty successful outcome without touching the
    /// network. Only a failure of the first results page is reported as an
    /// error; missing later pages set [`SearchOutcome::partial`] and an
    /// unavailable popularity table falls back to name order.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::empty();
        }

        let upstream_query = self.query_builder.build(query);
        tracing::debug!(query, upstream_query = %upstream_query, "searching");

        let aggregator = ResultAggregator::new(&self.fetcher, &self.config.api_base);
        let (aggregation, popularity) = futures::join!(
            aggregator.fetch_all(&upstream_query),
            PopularityIndex::load(&self.config.popularity_source, &self.client),
        );

        if let Some(error) = aggregation.error {
            return SearchOutcome::failed(error);
        }
        let partial = aggregation.is_partial();
        SearchOutcome::ok(rank(aggregation.cards, &popularity), partial)
    }

    /// Search and apply the outcome to `session`.
    ///
    /// Returns `None` when a newer search was started on the session before
    /// this one finished; its outcome is then discarded. Blank input resets
    /// the session to idle.
    pub async fn search_in(&self, session: &SearchSession, query: &str) -> Option<SearchOutcome> {
        if query.trim().is_empty() {
            session.reset();
            return Some(SearchOutcome::empty());
        }

        let ticket = session.begin();
        let outcome = self.search(query).await;
        session.complete(ticket, query, &outcome).then_some(outcome)
    }

    /// A fresh session using this instance's reveal page size.
    pub fn session(&self) -> SearchSession {
        SearchSession::new(self.config.page_size)
    }

    /// The query builder used to rewrite user queries.
    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query_builder
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Pauperfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pauperfall(api_base={}, popularity={:?}, tags=[{}], page_size={})",
            self.config.api_base,
            self.config.popularity_source,
            self.config.required_tags.join(", "),
            self.config.page_size
        )
    }
}
