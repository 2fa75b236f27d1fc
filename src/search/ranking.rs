//! Pauperlarity ranking.
//!
//! Cards are ordered by popularity score (descending), then deck count
//! (descending), then by name in collation order. The sort is stable, so
//! printings sharing a name keep their upstream order.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Card, PopularityEntry};
use crate::popularity::PopularityIndex;

/// Sort `cards` by popularity.
///
/// Deterministic for a given card list and index; ranking an already
/// ranked list leaves it unchanged.
pub fn rank(mut cards: Vec<Card>, popularity: &PopularityIndex) -> Vec<Card> {
    cards.sort_by_cached_key(|card| RankKey::new(card, popularity));
    cards
}

/// Order two cards the way [`rank`] does.
pub fn compare_cards(a: &Card, b: &Card, popularity: &PopularityIndex) -> Ordering {
    RankKey::new(a, popularity).cmp(&RankKey::new(b, popularity))
}

/// Compare card names for display order.
///
/// Accents and case are ignored first, so "Lim-Dûl's Vault" sorts as if
/// spelled "lim-dul's vault". Names that collate equal fall back to
/// code-point order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercased name with diacritics stripped.
pub fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

struct RankKey {
    entry: PopularityEntry,
    collation: String,
    name: String,
}

impl RankKey {
    fn new(card: &Card, popularity: &PopularityIndex) -> Self {
        Self {
            entry: popularity.get(&card.name),
            collation: collation_key(&card.name),
            name: card.name.clone(),
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .popularity_score
            .total_cmp(&self.entry.popularity_score)
            .then_with(|| other.entry.decks.cmp(&self.entry.decks))
            .then_with(|| self.collation.cmp(&other.collation))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}
