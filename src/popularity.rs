//! Pauper popularity table loading and lookup.
//!
//! The table is a JSON object mapping card name to
//! `{"popularityScore": number, "decks": number}`. Older tables map the name
//! straight to a number, which is read as the score with zero decks.
//! Loading never fails from the caller's point of view: an unreachable or
//! malformed table yields an empty index, so every card ranks with the
//! default entry.

use std::collections::HashMap;

use reqwest::Client;
use serde_json::Value;

use crate::config::PopularitySource;
use crate::error::{PauperfallError, Result};
use crate::models::PopularityEntry;

/// Case-insensitive lookup from card name to [`PopularityEntry`].
#[derive(Debug, Clone, Default)]
pub struct PopularityIndex {
    entries: HashMap<String, PopularityEntry>,
}

impl PopularityIndex {
    /// An index with no entries; every lookup yields the default entry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from `source`.
    ///
    /// Any fetch, status or parse failure is logged and yields an empty index.
    pub async fn load(source: &PopularitySource, client: &Client) -> Self {
        match Self::try_load(source, client).await {
            Ok(index) => {
                tracing::debug!(entries = index.len(), "popularity table loaded");
                index
            }
            Err(e) => {
                tracing::warn!(source = ?source, error = %e, "failed to load popularity table");
                Self::empty()
            }
        }
    }

    async fn try_load(source: &PopularitySource, client: &Client) -> Result<Self> {
        let bytes = match source {
            PopularitySource::Url(url) => {
                let resp = client.get(url).send().await?.error_for_status()?;
                resp.bytes().await?.to_vec()
            }
            PopularitySource::File(path) => tokio::fs::read(path).await?,
        };
        Self::from_slice(&bytes)
    }

    /// Parse a table from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_json(&value)
    }

    /// Build an index from a parsed table.
    ///
    /// The top level must be an object. Entries whose value is neither a
    /// number nor an object are skipped.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            PauperfallError::Malformed(
                "popularity table must be an object mapping card name to {popularityScore, decks}"
                    .to_string(),
            )
        })?;

        let mut entries = HashMap::with_capacity(map.len());
        for (name, raw) in map {
            match parse_entry(raw) {
                Some(entry) => {
                    entries.insert(name.to_lowercase(), entry);
                }
                None => tracing::debug!(card = %name, "skipping unreadable popularity entry"),
            }
        }
        Ok(Self { entries })
    }

    /// Add or replace the entry for `name`.
    pub fn insert(&mut self, name: &str, entry: PopularityEntry) {
        self.entries.insert(name.to_lowercase(), entry);
    }

    /// Look up `name`, ignoring case. Unknown names get `{0, 0}`.
    pub fn get(&self, name: &str) -> PopularityEntry {
        self.entries
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, PopularityEntry)> for PopularityIndex {
    fn from_iter<I: IntoIterator<Item = (S, PopularityEntry)>>(iter: I) -> Self {
        let mut index = Self::empty();
        for (name, entry) in iter {
            index.insert(name.as_ref(), entry);
        }
        index
    }
}

fn parse_entry(raw: &Value) -> Option<PopularityEntry> {
    match raw {
        Value::Number(n) => Some(PopularityEntry::new(n.as_f64()?, 0)),
        Value::Object(obj) => {
            let score = obj
                .get("popularityScore")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let decks = obj.get("decks").map(deck_count).unwrap_or(0);
            Some(PopularityEntry::new(score, decks))
        }
        _ => None,
    }
}

fn deck_count(raw: &Value) -> u64 {
    raw.as_u64()
        .or_else(|| raw.as_f64().map(|f| f.max(0.0) as u64))
        .unwrap_or(0)
}
