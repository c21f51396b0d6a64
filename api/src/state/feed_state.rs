use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RouletteError;

use super::{History, Outcome};

/// Identity of one roulette feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedKey {
    /// The upstream row id. Preferred for matching since names are not unique.
    pub id: String,

    /// The table name shown on the card.
    pub name: String,
}

impl FeedKey {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Check whether a sample identity refers to this feed.
    /// Ids are compared exactly; the name is only consulted when either side has no id.
    pub fn matches(&self, other: &FeedKey) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            return self.id == other.id;
        }
        !self.name.is_empty() && self.name.to_lowercase() == other.name.to_lowercase()
    }

    pub fn is_blank(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

/// State of the upstream strategy engine for a feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyState {
    #[default]
    Neutral,
    Trigger,
    Gale,
    Morto,
    PostGaleNeutral,
}

impl StrategyState {
    /// Decode the upstream label. Unknown or missing labels read as neutral.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("TRIGGER") => StrategyState::Trigger,
            Some("GALE") => StrategyState::Gale,
            Some("MORTO") => StrategyState::Morto,
            Some("POST_GALE_NEUTRAL") => StrategyState::PostGaleNeutral,
            _ => StrategyState::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyState::Neutral => "NEUTRAL",
            StrategyState::Trigger => "TRIGGER",
            StrategyState::Gale => "GALE",
            StrategyState::Morto => "MORTO",
            StrategyState::PostGaleNeutral => "POST_GALE_NEUTRAL",
        }
    }
}

/// Counters and strategy text carried by every poll sample.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedMeta {
    pub wins: u64,
    pub losses: u64,
    pub suggestion: String,
    pub strategy: StrategyState,
    pub trigger: Option<Outcome>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-feed aggregate owned by one reconciler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedState {
    pub key: FeedKey,
    pub history: History,
    pub meta: FeedMeta,
}

impl FeedState {
    pub fn new(key: FeedKey, bound: usize) -> Result<Self, RouletteError> {
        Ok(Self {
            key,
            history: History::new(bound)?,
            meta: FeedMeta::default(),
        })
    }

    /// Overwrite counters, suggestion and strategy fields with the sample's.
    pub fn set_meta(&mut self, meta: &FeedMeta) {
        self.meta.clone_from(meta);
    }
}
