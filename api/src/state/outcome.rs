use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_OUTCOME, RED_NUMBERS};
use crate::error::RouletteError;

/// A single spin result, 0 through 36.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Outcome(u8);

/// The pocket color of an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Outcome {
    /// The green zero.
    pub const ZERO: Outcome = Outcome(0);

    pub fn new(value: u8) -> Result<Self, RouletteError> {
        if value > MAX_OUTCOME {
            return Err(RouletteError::OutcomeOutOfRange);
        }
        Ok(Outcome(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Get the pocket color.
    pub fn color(self) -> Color {
        if self.0 == 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RouletteError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u8::try_from(value).map_err(|_| RouletteError::OutcomeOutOfRange)?;
        Outcome::new(value)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build a list of outcomes from raw integers, failing on the first value off the wheel.
pub fn outcomes_from(values: &[i64]) -> Result<Vec<Outcome>, RouletteError> {
    values.iter().map(|&v| Outcome::try_from(v)).collect()
}
