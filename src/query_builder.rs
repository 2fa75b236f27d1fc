//! Upstream query construction.
//!
//! Rewrites a raw user query into the string sent to the search API: an
//! easter-egg trigger replaces the whole query, otherwise every mandatory
//! filter tag missing from the query is appended.
//!
//! # Example
//!
//! ```rust
//! use pauperfall::QueryBuilder;
//! let qb = QueryBuilder::default();
//! assert_eq!(qb.build("island"), "island legal:pauper");
//! assert_eq!(qb.build("ISLAND legal:PAUPER"), "ISLAND legal:PAUPER");
//! ```

use serde::{Deserialize, Serialize};

use crate::config;

/// A trigger phrase and the query that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasterEgg {
    /// Matched case-insensitively as a substring of the raw query.
    pub trigger: String,
    /// Sent upstream verbatim.
    pub replacement: String,
}

impl EasterEgg {
    pub fn new(trigger: &str, replacement: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Builds upstream query strings from raw user input.
///
/// Tags and easter eggs are injected at construction; the builder holds no
/// other state and [`build`](Self::build) is pure.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    required_tags: Vec<String>,
    easter_eggs: Vec<EasterEgg>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(config::required_tags(), config::easter_eggs())
    }
}

impl QueryBuilder {
    /// Create a builder with the given mandatory tags and easter eggs.
    ///
    /// Both lists are ordered: tags are appended in order, and the first
    /// matching easter egg wins.
    pub fn new(required_tags: Vec<String>, easter_eggs: Vec<EasterEgg>) -> Self {
        Self {
            required_tags,
            easter_eggs,
        }
    }

    /// Add a mandatory tag after the existing ones.
    pub fn require_tag(&mut self, tag: &str) -> &mut Self {
        self.required_tags.push(tag.to_string());
        self
    }

    /// Add an easter egg with lower priority than the existing ones.
    pub fn easter_egg(&mut self, trigger: &str, replacement: &str) -> &mut Self {
        self.easter_eggs.push(EasterEgg::new(trigger, replacement));
        self
    }

    pub fn required_tags(&self) -> &[String] {
        &self.required_tags
    }

    pub fn easter_eggs(&self) -> &[EasterEgg] {
        &self.easter_eggs
    }

    /// Return the replacement of the first easter egg triggered by `raw`.
    pub fn easter_egg_for(&self, raw: &str) -> Option<&str> {
        let lower = raw.to_lowercase();
        self.easter_eggs
            .iter()
            .find(|egg| lower.contains(&egg.trigger.to_lowercase()))
            .map(|egg| egg.replacement.as_str())
    }

    /// Build the upstream query for `raw`.
    ///
    /// Callers are expected to short-circuit blank input before calling this;
    /// for blank input the result is just the missing tags.
    pub fn build(&self, raw: &str) -> String {
        if let Some(replacement) = self.easter_egg_for(raw) {
            return replacement.to_string();
        }

        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        let mut parts = vec![trimmed.to_string()];
        for tag in &self.required_tags {
            if !lower.contains(&tag.to_lowercase()) {
                parts.push(tag.clone());
            }
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}
