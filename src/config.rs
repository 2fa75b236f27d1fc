use std::path::PathBuf;
use std::time::Duration;

use crate::query_builder::EasterEgg;

pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";
pub const SEARCH_PATH: &str = "cards/search";
pub const SCRYFALL_WEB_SEARCH: &str = "https://scryfall.com/search";
pub const DEFAULT_POPULARITY_FILE: &str = "mtg_pauper_staples.json";

/// Number of cards handed to the presentation layer per reveal step.
pub const REVEAL_PAGE_SIZE: usize = 176;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shown when the first results page cannot be retrieved.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch search results.";
/// Shown when the search could not even be issued.
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";

pub fn required_tags() -> Vec<String> {
    vec!["legal:pauper".to_string()]
}

/// Ordered list; earlier entries take precedence when several match.
pub fn easter_eggs() -> Vec<EasterEgg> {
    vec![EasterEgg::new("best card in pauper", "artful dodge")]
}

pub fn default_user_agent() -> String {
    format!("pauperfall/{}", env!("CARGO_PKG_VERSION"))
}

/// Where the popularity table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopularitySource {
    /// Fetched over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl PopularitySource {
    /// Classify a location string: `http://` and `https://` are URLs,
    /// everything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            PopularitySource::Url(location.to_string())
        } else {
            PopularitySource::File(PathBuf::from(location))
        }
    }
}

impl Default for PopularitySource {
    fn default() -> Self {
        PopularitySource::File(PathBuf::from(DEFAULT_POPULARITY_FILE))
    }
}

/// Resolved configuration of a [`Pauperfall`](crate::Pauperfall) instance.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the upstream search API, without the endpoint path.
    pub api_base: String,
    pub popularity_source: PopularitySource,
    pub page_size: usize,
    pub timeout: Duration,
    pub required_tags: Vec<String>,
    pub easter_eggs: Vec<EasterEgg>,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: SCRYFALL_API_BASE.to_string(),
            popularity_source: PopularitySource::default(),
            page_size: REVEAL_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            required_tags: required_tags(),
            easter_eggs: easter_eggs(),
            user_agent: default_user_agent(),
        }
    }
}
