//! Sequenced search state for one consumer.
//!
//! Every search started through a [`SearchSession`] gets a ticket with a
//! monotonically increasing sequence number. When a search completes, its
//! outcome is applied only if no newer search was started in the meantime,
//! so a slow earlier query can never overwrite a faster later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config;
use crate::models::{Card, SearchOutcome};
use crate::reveal::RevealState;

/// Identifies one search invocation within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SessionState {
    applied: u64,
    query: Option<String>,
    cards: Vec<Card>,
    error: Option<String>,
    partial: bool,
    reveal: RevealState,
}

impl SessionState {
    fn new(page_size: usize) -> Self {
        Self {
            applied: 0,
            query: None,
            cards: Vec::new(),
            error: None,
            partial: false,
            reveal: RevealState::new(page_size),
        }
    }
}

/// Latest results of a consumer plus their reveal progress.
///
/// Safe to share between tasks; the lock is never held across an await.
#[derive(Debug)]
pub struct SearchSession {
    latest: AtomicU64,
    state: Mutex<SessionState>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(config::REVEAL_PAGE_SIZE)
    }
}

impl SearchSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            latest: AtomicU64::new(0),
            state: Mutex::new(SessionState::new(page_size)),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new invocation, superseding every earlier one.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no search was started after `ticket`.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Apply the outcome of `ticket`'s search.
    ///
    /// Returns `false` and leaves the session untouched when the ticket has
    /// been superseded. Otherwise the results replace the previous ones and
    /// the reveal restarts from the first page.
    pub fn complete(&self, ticket: SearchTicket, query: &str, outcome: &SearchOutcome) -> bool {
        let mut state = self.state();
        if !self.is_current(ticket) || ticket.0 <= state.applied {
            tracing::info!(
                sequence = ticket.0,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding stale search result"
            );
            return false;
        }
        state.applied = ticket.0;
        state.query = Some(query.to_string());
        state.cards = outcome.cards.clone();
        state.error = outcome.error.clone();
        state.partial = outcome.partial;
        let total = state.cards.len();
        state.reveal.load(total);
        true
    }

    /// Return to the idle state and supersede any in-flight search.
    pub fn reset(&self) {
        self.begin();
        let mut state = self.state();
        let page_size = state.reveal.page_size();
        *state = SessionState {
            applied: state.applied,
            ..SessionState::new(page_size)
        };
    }

    /// Handle a reveal trigger; returns the new visible count.
    pub fn reveal_more(&self) -> usize {
        self.state().reveal.grow()
    }

    /// Cards currently exposed to the presentation layer.
    pub fn visible_cards(&self) -> Vec<Card> {
        let state = self.state();
        state.cards[..state.reveal.visible()].to_vec()
    }

    /// Every card of the current result set, ranked.
    pub fn cards(&self) -> Vec<Card> {
        self.state().cards.clone()
    }

    pub fn reveal(&self) -> RevealState {
        self.state().reveal
    }

    pub fn has_more(&self) -> bool {
        self.state().reveal.has_more()
    }

    /// Query of the results currently held, if any.
    pub fn query(&self) -> Option<String> {
        self.state().query.clone()
    }

    /// Error message of the last applied search.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// True when the current results are missing later pages.
    pub fn is_partial(&self) -> bool {
        self.state().partial
    }
}
