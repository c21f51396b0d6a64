//! Poll sources feeding the reconciler

mod http;

pub use http::*;

use anyhow::Result;
use async_trait::async_trait;
use roleta_api::prelude::*;

/// Read-only access to the roletas listings. Every call may fail; callers keep the
/// last-known state and retry on the next tick.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    /// Full recent history of every feed.
    async fn full_snapshots(&self) -> Result<Vec<RawFullSnapshot>>;

    /// Newest outcome of every feed.
    async fn latest_samples(&self) -> Result<Vec<RawLatestSample>>;

    /// Full recent history of a single feed.
    async fn full_snapshot(&self, id: &str) -> Result<RawFullSnapshot>;

    async fn health(&self) -> Result<()>;
}
