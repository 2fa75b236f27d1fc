//! Blocking wrapper around [`Pauperfall`] for callers without an async runtime.
//!
//! Owns a current-thread Tokio runtime and drives each search to completion
//! on it. Do not call these methods from inside another async runtime.
//!
//! # Example
//!
//! ```no_run
//! use pauperfall::Pauperfall;
//!
//! let pf = Pauperfall::builder().build_blocking().unwrap();
//! let outcome = pf.search("counterspell");
//! println!("{} cards", outcome.cards.len());
//! ```

use tokio::runtime::{Builder, Runtime};

use crate::error::Result;
use crate::models::SearchOutcome;
use crate::session::SearchSession;
use crate::Pauperfall;

/// Synchronous facade over [`Pauperfall`].
pub struct BlockingPauperfall {
    runtime: Runtime,
    inner: Pauperfall,
}

impl BlockingPauperfall {
    /// Wrap an existing instance, creating the runtime that will drive it.
    pub fn new(inner: Pauperfall) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, inner })
    }

    /// Blocking form of [`Pauperfall::search`].
    pub fn search(&self, query: &str) -> SearchOutcome {
        self.runtime.block_on(self.inner.search(query))
    }

    /// Blocking form of [`Pauperfall::search_in`].
    pub fn search_in(&self, session: &SearchSession, query: &str) -> Option<SearchOutcome> {
        self.runtime.block_on(self.inner.search_in(session, query))
    }

    /// The wrapped async instance.
    pub fn inner(&self) -> &Pauperfall {
        &self.inner
    }
}
