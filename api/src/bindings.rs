//! TypeScript bindings generation for frontend types.
//!
//! This module exports the feed view to TypeScript using ts-rs so the
//! roulette cards render exactly what the poller publishes.
//! Enable with the `ts-bindings` feature flag.

// Re-export types with TS derive when feature is enabled
#[cfg(feature = "ts-bindings")]
mod ts_types {
    use ts_rs::TS;

    /// TypeScript export for the pocket color of a number
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/generated/")]
    #[ts(rename_all = "lowercase")]
    #[allow(dead_code)]
    pub enum ColorTS {
        Green,
        Red,
        Black,
    }

    /// TypeScript export for StrategyState
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/generated/")]
    #[allow(dead_code)]
    pub enum StrategyStateTS {
        #[ts(rename = "NEUTRAL")]
        Neutral,
        #[ts(rename = "TRIGGER")]
        Trigger,
        #[ts(rename = "GALE")]
        Gale,
        #[ts(rename = "MORTO")]
        Morto,
        #[ts(rename = "POST_GALE_NEUTRAL")]
        PostGaleNeutral,
    }

    /// TypeScript export for FeedView
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/generated/")]
    #[allow(dead_code)]
    pub struct FeedViewTS {
        /// Upstream row id
        pub id: String,
        /// Table name
        pub name: String,
        /// Recent numbers, most recent first
        pub history: Vec<u8>,
        /// The newest number, if any
        pub latest: Option<u8>,
        /// wins / (wins + losses), null when nothing was settled
        pub win_rate: Option<f64>,
        pub wins: u64,
        pub losses: u64,
        /// Suggestion text from the strategy engine
        pub suggestion: String,
        pub strategy: StrategyStateTS,
        /// Current trigger number
        pub trigger: Option<u8>,
        /// RFC 3339 timestamp of the last upstream update
        pub updated_at: Option<String>,
    }
}
