//! Receipt polling with a single terminal transition.
//!
//! Each tracked transaction gets its own background task that polls
//! `eth_getTransactionReceipt` until one of:
//! - a receipt with success status arrives → [`TxState::Confirmed`]
//! - a receipt with failure status arrives → [`TxState::Reverted`]
//! - the timeout elapses → [`TxState::TimedOut`]
//!
//! The task publishes the terminal state on a `watch` channel and exits, so
//! later queries read the cached value and never reach the node again.
//! RPC errors while polling are logged and retried until the deadline.

use std::sync::Arc;

use alloy_primitives::TxHash;
use splitter_chain::{ChainClient, TransactionHandle};
use splitter_utils::format_duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::state::TxState;

/// Spawns a polling task per submitted transaction.
pub struct TransactionTracker<C> {
    client: Arc<C>,
    config: TrackerConfig,
}

impl<C> Clone for TransactionTracker<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config,
        }
    }
}

impl<C: ChainClient + 'static> TransactionTracker<C> {
    pub fn new(client: Arc<C>, config: TrackerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Start tracking `handle`. Must be called from within a tokio runtime.
    pub fn track(&self, handle: TransactionHandle) -> TrackedTransaction {
        let (state_tx, state_rx) = watch::channel(TxState::Pending);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let client = Arc::clone(&self.client);
        let config = self.config;
        let task = tokio::spawn(async move {
            run_poll_loop(client, handle.hash, config, state_tx, cancel_rx).await;
        });

        TrackedTransaction {
            state_rx,
            cancel_tx: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Track `handle` and wait for its terminal state.
    pub async fn wait_for(&self, handle: TransactionHandle) -> Result<TxState, TrackerError> {
        self.track(handle).wait().await
    }
}

/// Handle to one tracked transaction.
///
/// Dropping it cancels the polling task.
pub struct TrackedTransaction {
    state_rx: watch::Receiver<TxState>,
    cancel_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl TrackedTransaction {
    /// Current state; terminal states are served from the cached value.
    pub fn state(&self) -> TxState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TxState> {
        self.state_rx.clone()
    }

    /// Wait until the transaction reaches a terminal state.
    ///
    /// Returns the cached terminal state immediately if one was already
    /// reached, and [`TrackerError::Cancelled`] if polling stopped first.
    pub async fn wait(&mut self) -> Result<TxState, TrackerError> {
        let current = self.state();
        if current.is_terminal() {
            return Ok(current);
        }

        let waited = self
            .state_rx
            .wait_for(TxState::is_terminal)
            .await
            .map(|state| state.clone());
        match waited {
            Ok(state) => Ok(state),
            Err(_) => {
                // Poller exited; it may still have published a terminal state.
                let last = self.state();
                if last.is_terminal() {
                    Ok(last)
                } else {
                    Err(TrackerError::Cancelled)
                }
            }
        }
    }

    /// Stop polling. A terminal state already reached is kept.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(true);
        }
    }

    /// Whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for TrackedTransaction {
    fn drop(&mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_poll_loop<C: ChainClient>(
    client: Arc<C>,
    hash: TxHash,
    config: TrackerConfig,
    state: watch::Sender<TxState>,
    mut cancel: watch::Receiver<bool>,
) {
    let started = Instant::now();
    let deadline = started + config.timeout;
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let polled = tokio::select! {
            biased;
            _ = cancel.changed() => {
                tracing::debug!(%hash, attempts, "tracking cancelled");
                return;
            }
            polled = client.transaction_receipt(hash) => polled,
            // A stalled request must not outlive the deadline.
            _ = tokio::time::sleep_until(deadline) => {
                publish_timeout(&state, hash, attempts, config);
                return;
            }
        };

        match polled {
            Ok(Some(receipt)) => {
                let next = if receipt.is_success() {
                    TxState::Confirmed(receipt)
                } else {
                    TxState::Reverted(receipt)
                };
                tracing::info!(
                    %hash,
                    state = next.as_str(),
                    attempts,
                    elapsed = %format_duration(started.elapsed()),
                    "transaction mined"
                );
                state.send_replace(next);
                return;
            }
            Ok(None) => tracing::trace!(%hash, attempts, "transaction not yet mined"),
            Err(e) => tracing::warn!(%hash, attempts, error = %e, "receipt poll failed, retrying"),
        }

        let now = Instant::now();
        if now >= deadline {
            publish_timeout(&state, hash, attempts, config);
            return;
        }

        let nap = config.poll_interval.min(deadline - now);
        tokio::select! {
            biased;
            _ = cancel.changed() => {
                tracing::debug!(%hash, attempts, "tracking cancelled");
                return;
            }
            _ = tokio::time::sleep(nap) => {}
        }
    }
}

fn publish_timeout(
    state: &watch::Sender<TxState>,
    hash: TxHash,
    attempts: u32,
    config: TrackerConfig,
) {
    tracing::warn!(
        %hash,
        attempts,
        waited = %format_duration(config.timeout),
        "transaction not mined before timeout"
    );
    state.send_replace(TxState::TimedOut);
}
