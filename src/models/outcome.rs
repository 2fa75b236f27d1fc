use serde::{Deserialize, Serialize};

use super::card::Card;

// ---------------------------------------------------------------------------
// SearchOutcome — What the presentation layer receives for one search
// ---------------------------------------------------------------------------

/// Result of one search invocation.
///
/// `success == false` only when no results could be produced at all; the
/// `error` then carries a message fit for display. `partial` marks a
/// successful result that is missing one or more later pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub success: bool,
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub partial: bool,
}

impl SearchOutcome {
    /// Successful search with no matches.
    pub fn empty() -> Self {
        Self::ok(Vec::new(), false)
    }

    pub fn ok(cards: Vec<Card>, partial: bool) -> Self {
        Self {
            success: true,
            cards,
            error: None,
            partial,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            cards: Vec::new(),
            error: Some(message.into()),
            partial: false,
        }
    }
}
