use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use roleta_api::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PollerCfg {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(with = "humantime_serde", default = "default_latest_interval")]
    pub latest_interval: Duration,
    #[serde(with = "humantime_serde", default = "default_full_interval")]
    pub full_interval: Duration,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub request_timeout: Duration,
    #[serde(default = "default_bound")]
    pub history_bound: usize,
    #[serde(default = "default_ua")]
    pub user_agent: String,
    /// Feeds to follow. Empty means every feed the first full snapshot returns.
    #[serde(default)]
    pub feeds: Vec<FeedKey>,
}

impl Default for PollerCfg {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            latest_interval: default_latest_interval(),
            full_interval: default_full_interval(),
            request_timeout: default_timeout(),
            history_bound: default_bound(),
            user_agent: default_ua(),
            feeds: Vec::new(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_latest_interval() -> Duration {
    LATEST_POLL_INTERVAL
}
fn default_full_interval() -> Duration {
    FULL_POLL_INTERVAL
}
fn default_timeout() -> Duration {
    REQUEST_TIMEOUT
}
fn default_bound() -> usize {
    HISTORY_BOUND
}
fn default_ua() -> String {
    concat!("roleta/", env!("CARGO_PKG_VERSION")).into()
}

impl PollerCfg {
    /// Load from a YAML file (optional) with `ROLETA_*` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ROLETA").try_parsing(true))
            .build()
            .context("building config")?;

        let poller: PollerCfg = cfg.try_deserialize().context("deserializing config")?;
        poller.validate()?;
        Ok(poller)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::from_str(text, FileFormat::Yaml))
            .build()
            .context("building config")?;

        let poller: PollerCfg = cfg.try_deserialize().context("deserializing config")?;
        poller.validate()?;
        Ok(poller)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_bound == 0 {
            bail!(RouletteError::InvalidBound);
        }
        if self.latest_interval.is_zero() || self.full_interval.is_zero() {
            bail!("poll intervals must be non-zero");
        }
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        Ok(())
    }
}
