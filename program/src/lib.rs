pub mod board;
pub mod config;
pub mod poller;
pub mod reconciler;
pub mod source;

pub use crate::board::{BatchReport, FeedBoard};
pub use crate::config::PollerCfg;
pub use crate::poller::{Poller, PollerHandle};
pub use crate::reconciler::{Applied, Reconciler};
pub use crate::source::{FeedSource, HttpFeedSource};
