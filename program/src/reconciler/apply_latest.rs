use roleta_api::prelude::*;
use tracing::debug;

use super::{Applied, Reconciler};

impl Reconciler {
    /// Apply a latest-only sample.
    ///
    /// A newest value equal to the current head only refreshes counters; anything else is
    /// prepended and the oldest entry evicted once the bound is reached. A true repeat spin
    /// looks the same as a repeated poll and is therefore folded into the head.
    pub fn apply_latest(&mut self, sample: &LatestSample) -> Applied {
        let Some(newest) = sample.newest else {
            return Applied::Ignored;
        };
        if !self.claim(&sample.key) {
            return Applied::Ignored;
        }

        if self.state.history.latest() == Some(newest) {
            self.state.set_meta(&sample.meta);
            return Applied::CountersOnly;
        }

        let evicted = self.state.history.push_front(newest);
        self.state.set_meta(&sample.meta);
        debug!(
            feed = %self.state.key.name,
            %newest,
            evicted = ?evicted.map(u8::from),
            "prepended latest outcome"
        );
        Applied::Prepended(newest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::tests::{meta, outcomes};

    fn reconciler() -> Reconciler {
        Reconciler::new(FeedKey::new("r7", "Speed Roulette"), 5).unwrap()
    }

    fn sample(newest: Option<u8>, wins: u64, losses: u64) -> LatestSample {
        LatestSample {
            key: FeedKey::new("r7", "Speed Roulette"),
            newest: newest.map(|n| Outcome::new(n).unwrap()),
            meta: meta(wins, losses),
        }
    }

    #[test]
    fn test_absent_value_is_noop() {
        let mut r = reconciler();
        let before = r.state().clone();
        assert_eq!(r.apply_latest(&sample(None, 10, 10)), Applied::Ignored);
        assert_eq!(r.state(), &before);
    }

    #[test]
    fn test_prepend_into_empty() {
        let mut r = reconciler();
        assert_eq!(
            r.apply_latest(&sample(Some(0), 1, 0)),
            Applied::Prepended(Outcome::ZERO)
        );
        assert_eq!(r.current_view().history, outcomes(&[0]));
        assert_eq!(r.current_view().wins, 1);
    }

    #[test]
    fn test_duplicate_is_idempotent() {
        let mut r = reconciler().with_history(&outcomes(&[7, 11]));
        assert_eq!(
            r.apply_latest(&sample(Some(34), 151, 50)),
            Applied::Prepended(Outcome::new(34).unwrap())
        );
        let once = r.state().clone();

        assert_eq!(
            r.apply_latest(&sample(Some(34), 151, 50)),
            Applied::CountersOnly
        );
        assert_eq!(r.state(), &once);
    }

    #[test]
    fn test_duplicate_refreshes_counters() {
        let mut r = reconciler().with_history(&outcomes(&[12]));
        assert_eq!(
            r.apply_latest(&sample(Some(12), 8, 2)),
            Applied::CountersOnly
        );
        let view = r.current_view();
        assert_eq!(view.history, outcomes(&[12]));
        assert_eq!((view.wins, view.losses), (8, 2));
        assert_eq!(view.suggestion, "8/2");
    }

    #[test]
    fn test_unmatched_identifier_is_noop() {
        let mut r = reconciler().with_history(&outcomes(&[3, 4]));
        let before = r.state().clone();
        let mut other = sample(Some(19), 99, 99);
        other.key = FeedKey::new("r8", "Speed Roulette");
        assert_eq!(r.apply_latest(&other), Applied::Ignored);
        assert_eq!(r.state(), &before);
    }

    #[test]
    fn test_name_fallback() {
        let mut r = reconciler();
        let mut by_name = sample(Some(19), 1, 1);
        by_name.key = FeedKey::new("", "SPEED ROULETTE");
        assert!(!r.apply_latest(&by_name).is_ignored());
    }
}
