use num_enum::IntoPrimitive;
use thiserror::Error;

/// Roleta error codes
/// Range 1000-1999: Feed errors
/// Range 2000-2999: Validation errors
/// Range 3000-3999: Source errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
pub enum RouletteError {
    // Feed Errors (1000-1999)
    #[error("Feed not found")]
    UnknownFeed = 1001,

    // Validation Errors (2000-2999)
    #[error("Outcome is outside the wheel (0-36)")]
    OutcomeOutOfRange = 2001,

    #[error("History bound must be at least one")]
    InvalidBound = 2002,

    #[error("Counter value is negative")]
    NegativeCounter = 2003,

    #[error("Sample is missing its feed identity")]
    MissingIdentity = 2004,

    // Source Errors (3000-3999)
    #[error("Poll source is unavailable")]
    SourceUnavailable = 3001,

    #[error("Poll sample could not be decoded")]
    MalformedSample = 3002,
}

impl RouletteError {
    /// The numeric code of this error.
    pub fn code(self) -> u32 {
        self.into()
    }
}
