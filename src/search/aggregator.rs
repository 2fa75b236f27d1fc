//! Multi-page retrieval of one logical result set.
//!
//! The first page decides how many pages exist. Pages 2..N are requested
//! concurrently from the first page's next-page URL, then folded back in
//! page order. A failed later page only costs its own cards.

use futures::future::join_all;

use crate::config;
use crate::models::{Card, UpstreamPage};
use crate::search::fetcher::{page_url, search_url, PageFetcher, PageOutcome};

/// Cards gathered for one upstream query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Cards in upstream order: page 1 first, then each later page.
    pub cards: Vec<Card>,
    /// User-facing message when nothing could be retrieved.
    pub error: Option<String>,
    /// Page numbers that failed and contributed no cards.
    pub failed_pages: Vec<usize>,
}

impl Aggregation {
    fn failed(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// True when at least one later page is missing from `cards`.
    pub fn is_partial(&self) -> bool {
        !self.failed_pages.is_empty()
    }
}

/// Number of pages implied by the first page.
///
/// An empty first page means a single page, whatever the reported total.
pub fn total_pages(first_page_size: usize, total_count: u64) -> usize {
    if first_page_size == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(first_page_size as u64).max(1);
    usize::try_from(pages).unwrap_or(usize::MAX)
}

/// Drives a [`PageFetcher`] across every page of a query.
pub struct ResultAggregator<'a> {
    fetcher: &'a PageFetcher,
    api_base: &'a str,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(fetcher: &'a PageFetcher, api_base: &'a str) -> Self {
        Self { fetcher, api_base }
    }

    /// Retrieve every page of `upstream_query`.
    ///
    /// Only a failure of the first page sets `error`. A 404 on the first
    /// page means no matches and is not an error.
    pub async fn fetch_all(&self, upstream_query: &str) -> Aggregation {
        let first_url = match search_url(self.api_base, upstream_query) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "could not build search URL");
                return Aggregation::failed(config::SEARCH_FAILED_MESSAGE);
            }
        };

        let first = match self.fetcher.fetch(&first_url).await {
            PageOutcome::Page(page) => page,
            PageOutcome::NoMatches => return Aggregation::default(),
            PageOutcome::Failed(reason) => {
                tracing::warn!(query = upstream_query, %reason, "first page unavailable");
                return Aggregation::failed(config::FETCH_FAILED_MESSAGE);
            }
        };

        let UpstreamPage {
            mut cards,
            total_count,
            next_page_url,
            ..
        } = first;
        let pages = total_pages(cards.len(), total_count);
        tracing::debug!(query = upstream_query, total_count, pages, "first page fetched");

        let template = match next_page_url {
            Some(template) if pages > 1 => template,
            _ => {
                return Aggregation {
                    cards,
                    ..Aggregation::default()
                }
            }
        };

        let template = template.as_str();
        let requests = (2..=pages).map(|page| async move {
            let outcome = match page_url(template, page) {
                Ok(url) => self.fetcher.fetch(&url).await,
                Err(e) => PageOutcome::Failed(e.to_string()),
            };
            (page, outcome)
        });
        let settled = join_all(requests).await;

        let mut failed_pages = Vec::new();
        for (page, outcome) in settled {
            match outcome {
                PageOutcome::Page(later) => cards.extend(later.cards),
                PageOutcome::NoMatches => {}
                PageOutcome::Failed(reason) => {
                    tracing::debug!(page, %reason, "page dropped from results");
                    failed_pages.push(page);
                }
            }
        }

        Aggregation {
            cards,
            error: None,
            failed_pages,
        }
    }
}
