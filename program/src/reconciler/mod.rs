//! Live number reconciler - one feed's history kept consistent across two poll sources

mod apply_full;
mod apply_latest;

use roleta_api::prelude::*;
use tracing::debug;

/// What a single poll sample did to the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Sample was for another feed, carried no value, or the feed is torn down.
    Ignored,
    /// Newest value matched the history head; only counters and suggestion were refreshed.
    CountersOnly,
    /// A new outcome was prepended to the history.
    Prepended(Outcome),
    /// History was replaced by a full snapshot.
    Replaced,
}

impl Applied {
    pub fn is_ignored(self) -> bool {
        self == Applied::Ignored
    }
}

/// Owns the state of exactly one feed. All mutation goes through `apply_latest` and `apply_full`.
#[derive(Clone, Debug)]
pub struct Reconciler {
    state: FeedState,
    torn_down: bool,
}

impl Reconciler {
    pub fn new(key: FeedKey, bound: usize) -> Result<Self, RouletteError> {
        Ok(Self {
            state: FeedState::new(key, bound)?,
            torn_down: false,
        })
    }

    /// Seed the history before the first poll, e.g. from numbers already on screen.
    pub fn with_history(mut self, seed: &[Outcome]) -> Self {
        self.state.history.replace(seed);
        self
    }

    pub fn key(&self) -> &FeedKey {
        &self.state.key
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Read-only projection for rendering. Never fails, even with no observations.
    pub fn current_view(&self) -> FeedView {
        FeedView::from(&self.state)
    }

    /// Stop observing the feed. Samples arriving afterwards are dropped.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Check a sample identity against this feed. A feed known only by name adopts the id of
    /// the first sample it matches, so another table sharing the name is never mixed in.
    fn claim(&mut self, key: &FeedKey) -> bool {
        if self.torn_down || !self.state.key.matches(key) {
            return false;
        }
        if self.state.key.id.is_empty() && !key.id.is_empty() {
            debug!(name = %self.state.key.name, id = %key.id, "bound feed id");
            self.state.key.id = key.id.clone();
        }
        true
    }
}
