use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consts::{MAX_OUTCOME, NOT_AVAILABLE, WHEEL_SIZE};

use super::{Color, FeedState, Outcome, StrategyState};

/// Read-only projection of a feed for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedView {
    pub id: String,
    pub name: String,
    /// Most recent first.
    pub history: Vec<Outcome>,
    pub latest: Option<Outcome>,
    /// `None` until at least one round has been settled.
    pub win_rate: Option<f64>,
    pub wins: u64,
    pub losses: u64,
    pub suggestion: String,
    pub strategy: StrategyState,
    pub trigger: Option<Outcome>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fraction of settled rounds that were wins.
pub fn win_rate(wins: u64, losses: u64) -> Option<f64> {
    let total = wins.checked_add(losses)?;
    if total == 0 {
        return None;
    }
    Some(wins as f64 / total as f64)
}

impl FeedView {
    /// The win rate as a percentage with one decimal, or "N/A".
    pub fn win_rate_label(&self) -> String {
        match self.win_rate {
            Some(rate) => format!("{:.1}%", rate * 100.0),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Pocket colors of the history, in the same order.
    pub fn colors(&self) -> Vec<Color> {
        self.history.iter().map(|o| o.color()).collect()
    }

    /// How often each number, 0 through 36, appears in the history.
    pub fn frequencies(&self) -> [u32; WHEEL_SIZE] {
        let mut counts = [0u32; WHEEL_SIZE];
        for outcome in &self.history {
            counts[usize::from(outcome.value())] += 1;
        }
        counts
    }

    /// The `count` most and least frequent numbers. Ties keep wheel order.
    pub fn hot_cold(&self, count: usize) -> (Vec<Outcome>, Vec<Outcome>) {
        let counts = self.frequencies();
        let mut ranked: Vec<Outcome> = (0..=MAX_OUTCOME).filter_map(|n| Outcome::new(n).ok()).collect();
        ranked.sort_by(|a, b| {
            counts[usize::from(b.value())].cmp(&counts[usize::from(a.value())])
        });

        let count = count.min(ranked.len());
        let hot = ranked[..count].to_vec();
        let cold = ranked[ranked.len() - count..].iter().rev().copied().collect();
        (hot, cold)
    }
}

impl From<&FeedState> for FeedView {
    fn from(state: &FeedState) -> Self {
        FeedView {
            id: state.key.id.clone(),
            name: state.key.name.clone(),
            history: state.history.to_vec(),
            latest: state.history.latest(),
            win_rate: win_rate(state.meta.wins, state.meta.losses),
            wins: state.meta.wins,
            losses: state.meta.losses,
            suggestion: state.meta.suggestion.clone(),
            strategy: state.meta.strategy,
            trigger: state.meta.trigger,
            updated_at: state.meta.updated_at,
        }
    }
}
