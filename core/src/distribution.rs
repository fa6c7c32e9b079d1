//! Triggering `distribute()` on a splitter.

use std::sync::Arc;

use alloy_primitives::{Address, TxHash};
use splitter_chain::contracts::ISimpleSplitter;
use splitter_chain::{write, ChainClient, TransactionReceipt};
use splitter_tracker::{TransactionTracker, TxState};
use splitter_types::TokenAmount;
use tracing::{info, warn};

use crate::error::SplitterError;
use crate::guard::InFlight;

/// A confirmed distribution.
///
/// The splitter's state has changed on chain; any snapshot taken before
/// this is stale and must be re-read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distributed {
    pub splitter: Address,
    /// Balance the distribution was triggered against.
    pub balance: TokenAmount,
    pub transaction_hash: TxHash,
    pub receipt: TransactionReceipt,
}

pub struct Distributor<C> {
    client: Arc<C>,
    tracker: TransactionTracker<C>,
    in_flight: InFlight,
}

impl<C: ChainClient + 'static> Distributor<C> {
    pub fn new(client: Arc<C>, tracker: TransactionTracker<C>) -> Self {
        Self {
            client,
            tracker,
            in_flight: InFlight::default(),
        }
    }

    pub fn is_distributing(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Distribute `splitter`'s balance to its recipients.
    ///
    /// `balance` is the last known balance, `None` if it was never read.
    /// Zero or unknown fails with [`SplitterError::NothingToDistribute`]
    /// without writing. Failures are returned as is and never retried.
    pub async fn distribute(
        &self,
        splitter: Address,
        balance: Option<TokenAmount>,
    ) -> Result<Distributed, SplitterError> {
        let balance = match balance {
            Some(b) if !b.is_zero() => b,
            _ => return Err(SplitterError::NothingToDistribute),
        };
        let _guard = self.in_flight.try_begin("distribute")?;

        let call = ISimpleSplitter::distributeCall {};
        let handle = write(self.client.as_ref(), splitter, &call).await?;
        info!(hash = %handle.hash, %splitter, %balance, "distribute submitted");

        match self.tracker.wait_for(handle).await? {
            TxState::Confirmed(receipt) => {
                info!(hash = %handle.hash, %splitter, "distribution confirmed");
                Ok(Distributed {
                    splitter,
                    balance,
                    transaction_hash: handle.hash,
                    receipt,
                })
            }
            TxState::Reverted(_) => {
                warn!(hash = %handle.hash, %splitter, "distribute reverted");
                Err(SplitterError::TransactionReverted { hash: handle.hash })
            }
            TxState::TimedOut => Err(SplitterError::Timeout { hash: handle.hash }),
            TxState::Pending => Err(SplitterError::Cancelled),
        }
    }
}
