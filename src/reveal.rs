//! Incremental reveal of a ranked result set (infinite scroll).
//!
//! The presentation layer shows a growing prefix of the ranked cards. After
//! a search completes the first `page_size` cards are visible; each reveal
//! trigger exposes up to `page_size` more until everything is shown.

use serde::{Deserialize, Serialize};

/// Visible count right after a search that returned `total` cards.
pub fn initial_reveal(total: usize, page_size: usize) -> usize {
    page_size.min(total)
}

/// Visible count after one more reveal step from `current`.
///
/// Never exceeds `total` and never decreases for `current <= total`.
pub fn grow_reveal(current: usize, total: usize, page_size: usize) -> usize {
    current.min(total).saturating_add(page_size).min(total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// No search has completed.
    Idle,
    /// A search completed and the first page is visible.
    Loaded,
    /// At least one reveal step happened and more cards remain.
    Revealing,
    /// Every card is visible.
    Exhausted,
}

/// How much of the current result set is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    total: usize,
    visible: usize,
    page_size: usize,
    phase: RevealPhase,
}

impl RevealState {
    /// Idle state revealing `page_size` cards per step (at least one).
    pub fn new(page_size: usize) -> Self {
        Self {
            total: 0,
            visible: 0,
            page_size: page_size.max(1),
            phase: RevealPhase::Idle,
        }
    }

    /// Start revealing a fresh result set of `total` cards.
    ///
    /// Progress from any previous result set is discarded.
    pub fn load(&mut self, total: usize) -> usize {
        self.total = total;
        self.visible = initial_reveal(total, self.page_size);
        self.phase = RevealPhase::Loaded;
        self.visible
    }

    /// Handle one reveal trigger and return the new visible count.
    ///
    /// Does nothing while idle.
    pub fn grow(&mut self) -> usize {
        if self.phase == RevealPhase::Idle {
            return self.visible;
        }
        self.visible = grow_reveal(self.visible, self.total, self.page_size);
        self.phase = if self.visible >= self.total {
            RevealPhase::Exhausted
        } else {
            RevealPhase::Revealing
        };
        self.visible
    }

    /// Back to idle, as before any search.
    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// True when cards beyond the visible prefix remain.
    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }
}
