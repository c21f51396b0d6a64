//! Poller - drives a feed board from two timers on a single task

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use roleta_api::prelude::*;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::board::FeedBoard;
use crate::config::PollerCfg;
use crate::source::FeedSource;

#[derive(Clone, Copy, Debug)]
enum Tick {
    Full,
    Latest,
}

pub struct Poller {
    source: Arc<dyn FeedSource>,
    board: FeedBoard,
    latest_every: Duration,
    full_every: Duration,
    shutdown: CancellationToken,
    views: watch::Sender<Vec<FeedView>>,
}

/// Handle to a running poller. Dropping it leaves the task running; call `teardown`.
pub struct PollerHandle {
    shutdown: CancellationToken,
    views: watch::Receiver<Vec<FeedView>>,
    task: JoinHandle<FeedBoard>,
}

impl Poller {
    pub fn new(source: Arc<dyn FeedSource>, board: FeedBoard, cfg: &PollerCfg) -> Self {
        let (views, _) = watch::channel(board.views());
        Self {
            source,
            board,
            latest_every: cfg.latest_interval,
            full_every: cfg.full_interval,
            shutdown: CancellationToken::new(),
            views,
        }
    }

    /// Build the board a config asks for: the listed feeds, or every feed when none are listed.
    pub fn board_from(cfg: &PollerCfg) -> Result<FeedBoard> {
        let mut board = FeedBoard::new(cfg.history_bound)?;
        if cfg.feeds.is_empty() {
            return Ok(board.tracking_all());
        }
        for key in &cfg.feeds {
            board
                .track(key.clone())
                .with_context(|| format!("tracking feed {:?}", key.name))?;
        }
        Ok(board)
    }

    pub fn spawn(self) -> PollerHandle {
        let shutdown = self.shutdown.clone();
        let views = self.views.subscribe();
        let task = tokio::spawn(self.run());
        PollerHandle {
            shutdown,
            views,
            task,
        }
    }

    async fn run(mut self) -> FeedBoard {
        info!(
            feeds = self.board.len(),
            latest_every = ?self.latest_every,
            full_every = ?self.full_every,
            "poller started"
        );
        let mut latest = interval(self.latest_every);
        latest.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut full = interval(self.full_every);
        full.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let tick = tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => None,

                // full first so the initial snapshot lands before the first latest sample
                _ = full.tick() => Some(Tick::Full),

                _ = latest.tick() => Some(Tick::Latest),
            };

            match tick {
                Some(Tick::Full) => self.poll_full().await,
                Some(Tick::Latest) => self.poll_latest().await,
                None => {
                    info!("poller: shutdown requested");
                    break;
                }
            }
        }

        self.board.teardown();
        info!("poller stopped cleanly");
        self.board
    }

    async fn poll_full(&mut self) {
        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return,
            result = self.source.full_snapshots() => result,
        };
        if self.shutdown.is_cancelled() {
            debug!("discarding full snapshot completed after teardown");
            return;
        }
        match result {
            Ok(rows) => {
                self.board.apply_full_batch(rows);
                self.publish();
            }
            Err(e) => warn!("full snapshot poll failed: {:#}", e),
        }
    }

    async fn poll_latest(&mut self) {
        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return,
            result = self.source.latest_samples() => result,
        };
        if self.shutdown.is_cancelled() {
            debug!("discarding latest sample completed after teardown");
            return;
        }
        match result {
            Ok(rows) => {
                self.board.apply_latest_batch(rows);
                self.publish();
            }
            Err(e) => warn!("latest poll failed: {:#}", e),
        }
    }

    fn publish(&mut self) {
        let next = self.board.views();
        self.views.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

impl PollerHandle {
    /// Subscribe to board views. A new value is published whenever a poll changes anything.
    pub fn subscribe(&self) -> watch::Receiver<Vec<FeedView>> {
        self.views.clone()
    }

    pub fn current(&self) -> Vec<FeedView> {
        self.views.borrow().clone()
    }

    /// Stop both timers and wait for the task. Polls still in flight are discarded.
    pub async fn teardown(self) -> Result<FeedBoard> {
        self.shutdown.cancel();
        self.task.await.context("poller task failed")
    }
}
