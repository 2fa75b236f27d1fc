//! The search pipeline below the [`Pauperfall`](crate::Pauperfall) facade.
//!
//! [`fetcher`] performs single page requests, [`aggregator`] fans them out
//! across a whole result set, and [`ranking`] orders the merged cards.

pub mod aggregator;
pub mod fetcher;
pub mod ranking;

pub use aggregator::{total_pages, Aggregation, ResultAggregator};
pub use fetcher::{page_url, search_url, PageFetcher, PageOutcome};
pub use ranking::{collation_key, compare_cards, compare_names, rank};
