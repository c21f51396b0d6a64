use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::consts::NO_TRIGGER;
use crate::error::RouletteError;

use super::{outcomes_from, FeedKey, FeedMeta, Outcome, StrategyState};

/// A row of the full-snapshot listing, as served by the proxy.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawFullSnapshot {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub numeros: Option<Vec<i64>>,
    #[serde(default)]
    pub vitorias: Option<i64>,
    #[serde(default)]
    pub derrotas: Option<i64>,
    #[serde(default)]
    pub sugestao_display: Option<String>,
    #[serde(default)]
    pub estado_estrategia: Option<String>,
    #[serde(default)]
    pub numero_gatilho: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A row of the latest-only listing, as served by the proxy.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawLatestSample {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub numero_recente: Option<i64>,
    #[serde(default)]
    pub vitorias: Option<i64>,
    #[serde(default)]
    pub derrotas: Option<i64>,
    #[serde(default)]
    pub sugestao_display: Option<String>,
    #[serde(default)]
    pub estado_estrategia: Option<String>,
    #[serde(default)]
    pub numero_gatilho: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Authoritative snapshot of one feed's recent history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullSnapshot {
    pub key: FeedKey,
    /// Most recent first.
    pub history: Vec<Outcome>,
    pub meta: FeedMeta,
}

/// Frequent, partial sample carrying only the newest outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatestSample {
    pub key: FeedKey,
    /// `None` when the feed has no observation yet.
    pub newest: Option<Outcome>,
    pub meta: FeedMeta,
}

impl TryFrom<RawFullSnapshot> for FullSnapshot {
    type Error = RouletteError;

    fn try_from(raw: RawFullSnapshot) -> Result<Self, Self::Error> {
        let key = parse_key(raw.id, raw.nome)?;
        let history = outcomes_from(&raw.numeros.unwrap_or_default())?;
        let meta = parse_meta(
            raw.vitorias,
            raw.derrotas,
            raw.sugestao_display,
            raw.estado_estrategia,
            raw.numero_gatilho,
            raw.updated_at,
        )?;
        Ok(FullSnapshot { key, history, meta })
    }
}

impl TryFrom<RawLatestSample> for LatestSample {
    type Error = RouletteError;

    fn try_from(raw: RawLatestSample) -> Result<Self, Self::Error> {
        let key = parse_key(raw.id, raw.nome)?;
        let newest = raw.numero_recente.map(Outcome::try_from).transpose()?;
        let meta = parse_meta(
            raw.vitorias,
            raw.derrotas,
            raw.sugestao_display,
            raw.estado_estrategia,
            raw.numero_gatilho,
            raw.updated_at,
        )?;
        Ok(LatestSample { key, newest, meta })
    }
}

fn parse_key(id: Option<String>, name: Option<String>) -> Result<FeedKey, RouletteError> {
    let key = FeedKey::new(id.unwrap_or_default(), name.unwrap_or_default());
    if key.is_blank() {
        return Err(RouletteError::MissingIdentity);
    }
    Ok(key)
}

fn parse_counter(value: Option<i64>) -> Result<u64, RouletteError> {
    u64::try_from(value.unwrap_or(0)).map_err(|_| RouletteError::NegativeCounter)
}

fn parse_meta(
    wins: Option<i64>,
    losses: Option<i64>,
    suggestion: Option<String>,
    strategy: Option<String>,
    trigger: Option<i64>,
    updated_at: Option<String>,
) -> Result<FeedMeta, RouletteError> {
    let trigger = match trigger {
        None | Some(NO_TRIGGER) => None,
        Some(n) => Some(Outcome::try_from(n)?),
    };
    // An unparseable timestamp is not worth dropping the sample over.
    let updated_at = updated_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));
    Ok(FeedMeta {
        wins: parse_counter(wins)?,
        losses: parse_counter(losses)?,
        suggestion: suggestion.unwrap_or_default(),
        strategy: StrategyState::from_label(strategy.as_deref()),
        trigger,
        updated_at,
    })
}
