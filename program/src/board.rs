//! Feed board - one reconciler per tracked feed, fed by whole-listing poll results

use std::collections::HashSet;

use roleta_api::prelude::*;
use tracing::{debug, info, warn};

use crate::reconciler::{Applied, Reconciler};

/// Tally of one batch of poll results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Samples that prepended or replaced history.
    pub changed: usize,
    /// Samples that only refreshed counters.
    pub refreshed: usize,
    /// Samples for feeds nobody tracks, or carrying no value.
    pub ignored: usize,
    /// Samples that failed validation and were dropped.
    pub malformed: usize,
    /// Feeds picked up from this batch.
    pub tracked: usize,
}

impl BatchReport {
    fn record(&mut self, applied: Applied) {
        match applied {
            Applied::Ignored => self.ignored += 1,
            Applied::CountersOnly => self.refreshed += 1,
            Applied::Prepended(_) | Applied::Replaced => self.changed += 1,
        }
    }
}

#[derive(Debug)]
pub struct FeedBoard {
    feeds: Vec<Reconciler>,
    bound: usize,
    track_all: bool,
}

impl FeedBoard {
    pub fn new(bound: usize) -> Result<Self, RouletteError> {
        if bound == 0 {
            return Err(RouletteError::InvalidBound);
        }
        Ok(Self {
            feeds: Vec::new(),
            bound,
            track_all: false,
        })
    }

    /// Track every feed that shows up in a full snapshot, not only the ones added by hand.
    pub fn tracking_all(mut self) -> Self {
        self.track_all = true;
        self
    }

    /// Start tracking a feed. Tracking an already tracked feed is a no-op.
    pub fn track(&mut self, key: FeedKey) -> Result<(), RouletteError> {
        if key.is_blank() {
            return Err(RouletteError::MissingIdentity);
        }
        if self.position(&key).is_some() {
            return Ok(());
        }
        info!(id = %key.id, name = %key.name, "tracking feed");
        self.feeds.push(Reconciler::new(key, self.bound)?);
        Ok(())
    }

    /// Stop tracking a feed, looked up by id or name. The returned reconciler is already torn down.
    pub fn untrack(&mut self, handle: &str) -> Option<Reconciler> {
        let index = self.locate(handle)?;
        let mut reconciler = self.feeds.remove(index);
        reconciler.teardown();
        info!(handle, "untracked feed");
        Some(reconciler)
    }

    /// Tear down every feed. Later batches change nothing.
    pub fn teardown(&mut self) {
        self.track_all = false;
        for reconciler in self.feeds.iter_mut() {
            reconciler.teardown();
        }
    }

    /// Apply one full listing. Each feed takes at most one row per batch: the first it matches.
    pub fn apply_full_batch(&mut self, rows: Vec<RawFullSnapshot>) -> BatchReport {
        let mut report = BatchReport::default();
        let mut claimed = HashSet::new();
        for row in rows {
            let snapshot = match FullSnapshot::try_from(row) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(code = e.code(), "dropping full snapshot: {}", e);
                    report.malformed += 1;
                    continue;
                }
            };

            if self.track_all && self.position(&snapshot.key).is_none() {
                if let Ok(reconciler) = Reconciler::new(snapshot.key.clone(), self.bound) {
                    info!(id = %snapshot.key.id, name = %snapshot.key.name, "tracking new feed");
                    self.feeds.push(reconciler);
                    report.tracked += 1;
                }
            }

            let applied = match self.position(&snapshot.key) {
                Some(index) if claimed.insert(index) => self.feeds[index].apply_full(&snapshot),
                _ => Applied::Ignored,
            };
            report.record(applied);
        }
        debug!(?report, "applied full batch");
        report
    }

    /// Apply one latest-only listing, with the same one-row-per-feed rule as full batches.
    pub fn apply_latest_batch(&mut self, rows: Vec<RawLatestSample>) -> BatchReport {
        let mut report = BatchReport::default();
        let mut claimed = HashSet::new();
        for row in rows {
            let sample = match LatestSample::try_from(row) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!(code = e.code(), "dropping latest sample: {}", e);
                    report.malformed += 1;
                    continue;
                }
            };
            let applied = match self.position(&sample.key) {
                Some(index) if claimed.insert(index) => self.feeds[index].apply_latest(&sample),
                _ => Applied::Ignored,
            };
            report.record(applied);
        }
        debug!(?report, "applied latest batch");
        report
    }

    pub fn views(&self) -> Vec<FeedView> {
        self.feeds.iter().map(Reconciler::current_view).collect()
    }

    /// View of one feed, looked up by id or, failing that, by case-insensitive name.
    pub fn view(&self, handle: &str) -> Option<FeedView> {
        self.locate(handle).map(|index| self.feeds[index].current_view())
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    fn position(&self, key: &FeedKey) -> Option<usize> {
        self.feeds.iter().position(|r| r.key().matches(key))
    }

    fn locate(&self, handle: &str) -> Option<usize> {
        self.feeds
            .iter()
            .position(|r| r.key().id == handle)
            .or_else(|| {
                let handle = handle.to_lowercase();
                self.feeds
                    .iter()
                    .position(|r| r.key().name.to_lowercase() == handle)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(id: &str, name: &str, numbers: &[i64], wins: i64, losses: i64) -> RawFullSnapshot {
        RawFullSnapshot {
            id: Some(id.to_string()),
            nome: Some(name.to_string()),
            numeros: Some(numbers.to_vec()),
            vitorias: Some(wins),
            derrotas: Some(losses),
            ..Default::default()
        }
    }

    fn latest_row(id: &str, name: &str, newest: Option<i64>) -> RawLatestSample {
        RawLatestSample {
            id: Some(id.to_string()),
            nome: Some(name.to_string()),
            numero_recente: newest,
            vitorias: Some(1),
            derrotas: Some(1),
            ..Default::default()
        }
    }

    fn history(board: &FeedBoard, id: &str) -> Vec<u8> {
        board
            .view(id)
            .unwrap()
            .history
            .into_iter()
            .map(u8::from)
            .collect()
    }

    #[test]
    fn test_dispatch_by_id() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("a", "Roulette")).unwrap();
        board.track(FeedKey::new("b", "Roulette")).unwrap();

        let report = board.apply_full_batch(vec![
            full_row("b", "Roulette", &[1, 2, 3], 1, 0),
            full_row("a", "Roulette", &[4, 5, 6], 0, 1),
            full_row("c", "Other", &[7], 0, 0),
        ]);
        assert_eq!(report.changed, 2);
        assert_eq!(report.ignored, 1);
        assert_eq!(history(&board, "a"), vec![4, 5, 6]);
        assert_eq!(history(&board, "b"), vec![1, 2, 3]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_track_is_idempotent() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("a", "A")).unwrap();
        board.track(FeedKey::new("a", "A")).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.track(FeedKey::default()),
            Err(RouletteError::MissingIdentity)
        );
    }

    #[test]
    fn test_malformed_row_keeps_state() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("a", "A")).unwrap();
        board.apply_full_batch(vec![full_row("a", "A", &[9, 8], 3, 1)]);

        let report = board.apply_full_batch(vec![full_row("a", "A", &[9, 80], 4, 1)]);
        assert_eq!(report.malformed, 1);
        assert_eq!(history(&board, "a"), vec![9, 8]);
        assert_eq!(board.view("a").unwrap().wins, 3);

        let report = board.apply_latest_batch(vec![latest_row("a", "A", Some(37))]);
        assert_eq!(report.malformed, 1);
        assert_eq!(history(&board, "a"), vec![9, 8]);
    }

    #[test]
    fn test_latest_batch() {
        let mut board = FeedBoard::new(3).unwrap();
        board.track(FeedKey::new("a", "A")).unwrap();
        board.apply_full_batch(vec![full_row("a", "A", &[1, 2, 3], 0, 0)]);

        let report = board.apply_latest_batch(vec![
            latest_row("a", "A", Some(4)),
            latest_row("z", "Z", Some(4)),
        ]);
        assert_eq!(report.changed, 1);
        assert_eq!(report.ignored, 1);
        assert_eq!(history(&board, "a"), vec![4, 1, 2]);

        let report = board.apply_latest_batch(vec![latest_row("a", "A", Some(4))]);
        assert_eq!(report.refreshed, 1);
        assert_eq!(history(&board, "a"), vec![4, 1, 2]);

        let report = board.apply_latest_batch(vec![latest_row("a", "A", None)]);
        assert_eq!(report.ignored, 1);
    }

    #[test]
    fn test_tracking_all() {
        let mut board = FeedBoard::new(5).unwrap().tracking_all();
        let report = board.apply_full_batch(vec![
            full_row("a", "A", &[1], 0, 0),
            full_row("b", "B", &[2], 0, 0),
        ]);
        assert_eq!(report.tracked, 2);
        assert_eq!(report.changed, 2);
        assert_eq!(board.len(), 2);

        // latest-only samples never add feeds
        board.apply_latest_batch(vec![latest_row("c", "C", Some(3))]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_untrack_and_teardown() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("a", "A")).unwrap();
        board.track(FeedKey::new("b", "B")).unwrap();

        let removed = board.untrack("a").unwrap();
        assert!(removed.is_torn_down());
        assert!(board.view("a").is_none());
        assert!(board.untrack("a").is_none());

        board.teardown();
        let report = board.apply_full_batch(vec![full_row("b", "B", &[5], 1, 1)]);
        assert_eq!(report.ignored, 1);
        assert!(board.view("b").unwrap().history.is_empty());
    }

    #[test]
    fn test_name_only_feed_takes_one_table() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("", "Roulette")).unwrap();

        let report = board.apply_latest_batch(vec![
            latest_row("a", "Roulette", Some(4)),
            latest_row("b", "Roulette", Some(9)),
        ]);
        assert_eq!(report.changed, 1);
        assert_eq!(report.ignored, 1);
        assert_eq!(history(&board, "a"), vec![4]);

        // once bound, the other table never reaches this feed
        board.apply_full_batch(vec![
            full_row("b", "Roulette", &[9, 9, 9], 0, 0),
            full_row("a", "Roulette", &[4, 1], 0, 0),
        ]);
        assert_eq!(history(&board, "a"), vec![4, 1]);
    }

    #[test]
    fn test_one_row_per_feed_without_ids() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("", "Roulette")).unwrap();

        let mut first = latest_row("", "Roulette", Some(4));
        first.id = None;
        let mut second = latest_row("", "Roulette", Some(9));
        second.id = None;
        let report = board.apply_latest_batch(vec![first, second]);
        assert_eq!(report.changed, 1);
        assert_eq!(history(&board, "roulette"), vec![4]);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut board = FeedBoard::new(5).unwrap();
        board.track(FeedKey::new("", "Speed Roulette")).unwrap();
        assert!(board.view("SPEED ROULETTE").is_some());
        assert!(board.view("Auto Roulette").is_none());

        let removed = board.untrack("speed roulette").unwrap();
        assert!(removed.is_torn_down());
        assert!(board.is_empty());
    }
}
