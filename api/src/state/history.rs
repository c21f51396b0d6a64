use crate::error::RouletteError;

use super::Outcome;

/// Recent outcomes of one feed, most recent first, never longer than `bound`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    outcomes: Vec<Outcome>,
    bound: usize,
}

impl History {
    pub fn new(bound: usize) -> Result<Self, RouletteError> {
        if bound == 0 {
            return Err(RouletteError::InvalidBound);
        }
        Ok(Self {
            outcomes: Vec::with_capacity(bound),
            bound,
        })
    }

    /// Build a history from a most-recent-first list, keeping only the first `bound` entries.
    pub fn from_outcomes(outcomes: &[Outcome], bound: usize) -> Result<Self, RouletteError> {
        let mut history = History::new(bound)?;
        history.replace(outcomes);
        Ok(history)
    }

    /// The most recently confirmed outcome.
    pub fn latest(&self) -> Option<Outcome> {
        self.outcomes.first().copied()
    }

    /// Prepend an outcome, evicting the oldest entry once the bound is reached.
    /// Returns the evicted outcome, if any.
    pub fn push_front(&mut self, outcome: Outcome) -> Option<Outcome> {
        let evicted = if self.outcomes.len() == self.bound {
            self.outcomes.pop()
        } else {
            None
        };
        self.outcomes.insert(0, outcome);
        evicted
    }

    /// Replace the whole history with a most-recent-first list, truncated to the bound.
    pub fn replace(&mut self, outcomes: &[Outcome]) {
        let keep = outcomes.len().min(self.bound);
        self.outcomes.clear();
        self.outcomes.extend_from_slice(&outcomes[..keep]);
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn to_vec(&self) -> Vec<Outcome> {
        self.outcomes.clone()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn bound(&self) -> usize {
        self.bound
    }
}
