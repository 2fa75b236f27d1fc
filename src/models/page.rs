use serde::{Deserialize, Serialize};

use super::card::Card;

// ---------------------------------------------------------------------------
// SearchEnvelope — Raw paginated list body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub data: Option<Vec<Card>>,
    #[serde(default)]
    pub total_cards: Option<u64>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

// ---------------------------------------------------------------------------
// UpstreamError — Error body returned with non-2xx statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub details: Option<String>,
}

// ---------------------------------------------------------------------------
// UpstreamPage — One fetched page of results
// ---------------------------------------------------------------------------

/// One page of a paginated result set.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPage {
    pub cards: Vec<Card>,
    /// Total matches across all pages; never less than `cards.len()`
    /// unless the API reported a positive smaller count.
    pub total_count: u64,
    pub has_next: bool,
    pub next_page_url: Option<String>,
}

impl From<SearchEnvelope> for UpstreamPage {
    fn from(envelope: SearchEnvelope) -> Self {
        let cards = envelope.data.unwrap_or_default();
        // A missing or zero count falls back to what this page holds
        let total_count = match envelope.total_cards {
            Some(n) if n > 0 => n,
            _ => cards.len() as u64,
        };
        let has_next = envelope.has_more || envelope.next_page.is_some();
        Self {
            cards,
            total_count,
            has_next,
            next_page_url: envelope.next_page,
        }
    }
}
