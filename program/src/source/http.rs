use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use roleta_api::prelude::*;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::FeedSource;
use crate::config::PollerCfg;

/// Talks to the roletas REST proxy.
pub struct HttpFeedSource {
    client: Client,
    base_url: Url,
}

impl HttpFeedSource {
    pub fn new(cfg: &PollerCfg) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout)
            .build()
            .context("building http client")?;
        Self::with_client(client, &cfg.api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("parsing api url {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("api url {base_url} cannot carry a path"));
        }
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL. Each segment is percent-encoded on its own.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("api url {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET and decode JSON. A 404 is reported as `not_found`; any other failure status as
    /// `SourceUnavailable`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        not_found: RouletteError,
    ) -> Result<T> {
        let url = self.url(segments)?;
        debug!(%url, "polling");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow::Error::new(RouletteError::SourceUnavailable).context(e))
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let err = if status == StatusCode::NOT_FOUND {
                not_found
            } else {
                RouletteError::SourceUnavailable
            };
            return Err(anyhow::Error::new(err)).with_context(|| format!("GET {url} returned {status}"));
        }

        resp.json::<T>()
            .await
            .map_err(|e| anyhow::Error::new(RouletteError::MalformedSample).context(e))
            .with_context(|| format!("decoding body of GET {url}"))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn full_snapshots(&self) -> Result<Vec<RawFullSnapshot>> {
        self.get_json(FULL_PATH, RouletteError::SourceUnavailable).await
    }

    async fn latest_samples(&self) -> Result<Vec<RawLatestSample>> {
        self.get_json(LATEST_PATH, RouletteError::SourceUnavailable).await
    }

    async fn full_snapshot(&self, id: &str) -> Result<RawFullSnapshot> {
        let mut segments = FULL_PATH.to_vec();
        segments.push(id);
        self.get_json(&segments, RouletteError::UnknownFeed).await
    }

    async fn health(&self) -> Result<()> {
        let _: serde_json::Value = self.get_json(HEALTH_PATH, RouletteError::SourceUnavailable).await?;
        Ok(())
    }
}
