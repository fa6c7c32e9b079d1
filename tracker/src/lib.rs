//! Transaction tracker.
//!
//! Turns a [`TransactionHandle`](splitter_chain::TransactionHandle) into one
//! terminal [`TxState`]: confirmed, reverted, or timed out. Polling runs on a
//! background task that is stopped on cancellation or drop.

pub mod config;
pub mod error;
pub mod state;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use state::TxState;
pub use tracker::{TrackedTransaction, TransactionTracker};
