use serde::{Deserialize, Serialize};

/// Popularity of one card in the Pauper metagame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityEntry {
    pub popularity_score: f64,
    pub decks: u64,
}

impl PopularityEntry {
    pub const fn new(popularity_score: f64, decks: u64) -> Self {
        Self {
            popularity_score,
            decks,
        }
    }
}
