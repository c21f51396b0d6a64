use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roleta::{FeedSource, HttpFeedSource, Poller, PollerCfg};
use roleta_api::prelude::*;
use tracing::{info, info_span, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roleta", version, about = "Follow live roulette feeds")]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = "roleta.yml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll continuously and log every change (default)
    Watch,
    /// Fetch one feed's full snapshot and print its view, with hot and cold numbers, as JSON
    Show {
        /// Upstream feed id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = PollerCfg::load(&args.config)?;

    let span = info_span!("roleta", api = %cfg.api_url, version = env!("CARGO_PKG_VERSION"));
    let _enter = span.enter();

    let source = Arc::new(HttpFeedSource::new(&cfg)?);
    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => watch(source, &cfg).await,
        Command::Show { id } => show(source.as_ref(), &id, cfg.history_bound).await,
    }
}

async fn watch(source: Arc<HttpFeedSource>, cfg: &PollerCfg) -> Result<()> {
    if let Err(e) = source.health().await {
        warn!("health check failed, polling anyway: {:#}", e);
    }

    let board = Poller::board_from(cfg)?;
    let handle = Poller::new(source, board, cfg).spawn();
    let mut views = handle.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received");
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                for view in views.borrow_and_update().iter() {
                    let history: Vec<u8> = view.history.iter().map(|&o| o.into()).collect();
                    info!(
                        feed = %view.name,
                        ?history,
                        colors = ?view.colors(),
                        win_rate = %view.win_rate_label(),
                        strategy = view.strategy.label(),
                        suggestion = %view.suggestion,
                        "feed view"
                    );
                }
            }
        }
    }

    let board = handle.teardown().await?;
    info!(feeds = board.len(), "stopped");
    Ok(())
}

async fn show(source: &HttpFeedSource, id: &str, bound: usize) -> Result<()> {
    let raw = source.full_snapshot(id).await?;
    let snapshot = FullSnapshot::try_from(raw).with_context(|| format!("feed {id} sent a malformed snapshot"))?;
    let mut feed = roleta::Reconciler::new(snapshot.key.clone(), bound)?;
    feed.apply_full(&snapshot);
    let view = feed.current_view();
    let (hot, cold) = view.hot_cold(HOT_COLD_COUNT);
    let label = view.win_rate_label();
    let report = serde_json::json!({
        "view": &view,
        "win_rate": label,
        "hot": hot,
        "cold": cold,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
