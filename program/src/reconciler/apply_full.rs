use roleta_api::prelude::*;
use tracing::debug;

use super::{Applied, Reconciler};

impl Reconciler {
    /// Apply a full snapshot. The snapshot is authoritative: the history becomes its first
    /// `bound` entries regardless of what the latest-only path prepended in between.
    pub fn apply_full(&mut self, sample: &FullSnapshot) -> Applied {
        if !self.claim(&sample.key) {
            return Applied::Ignored;
        }

        self.state.history.replace(&sample.history);
        self.state.set_meta(&sample.meta);
        debug!(
            feed = %self.state.key.name,
            len = self.state.history.len(),
            "replaced history from full snapshot"
        );
        Applied::Replaced
    }
}
