//! Splitter creation through the factory contract.
//!
//! `create_splitter` validates locally, submits `createSplitter`, waits for
//! the tracker's terminal state and, on success, takes the new splitter's
//! address from the first `SplitterCreated` log in the receipt. The receipt
//! is the only source of truth for the result.

use std::sync::Arc;

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use splitter_chain::contracts::ISplitterFactory::{self, SplitterCreated};
use splitter_chain::{find_first_event, read, write, ChainClient, TransactionReceipt};
use splitter_tracker::{TransactionTracker, TxState};
use splitter_types::RecipientSpec;
use tracing::{debug, info, warn};

use crate::error::SplitterError;
use crate::guard::InFlight;
use crate::validation::validate_recipients;

/// A deployed splitter, as reported by its `SplitterCreated` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationResult {
    pub splitter: Address,
    pub creator: Address,
    pub recipients: Vec<Address>,
    pub shares: Vec<U256>,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
}

pub struct SplitterFactory<C> {
    client: Arc<C>,
    tracker: TransactionTracker<C>,
    address: Address,
    in_flight: InFlight,
}

impl<C: ChainClient + 'static> SplitterFactory<C> {
    pub fn new(client: Arc<C>, tracker: TransactionTracker<C>, address: Address) -> Self {
        Self {
            client,
            tracker,
            address,
            in_flight: InFlight::default(),
        }
    }

    /// Factory contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Whether a creation is currently being submitted or tracked.
    pub fn is_creating(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Address of the splitter implementation the factory clones.
    pub async fn implementation(&self) -> Result<Address, SplitterError> {
        let ret = read(
            self.client.as_ref(),
            self.address,
            &ISplitterFactory::implementationCall {},
        )
        .await?;
        Ok(ret._0)
    }

    /// Deploy a splitter paying `specs`.
    ///
    /// Invalid input fails before any chain access. A second call while one
    /// is in flight fails with [`SplitterError::Busy`].
    pub async fn create_splitter(
        &self,
        specs: &[RecipientSpec],
    ) -> Result<CreationResult, SplitterError> {
        let validated = validate_recipients(specs)?;
        let _guard = self.in_flight.try_begin("create")?;

        let call = ISplitterFactory::createSplitterCall {
            recipients: validated.addresses,
            shares: validated.shares,
        };
        let handle = write(self.client.as_ref(), self.address, &call).await?;
        info!(
            hash = %handle.hash,
            factory = %self.address,
            recipients = specs.len(),
            "createSplitter submitted"
        );

        match self.tracker.wait_for(handle).await? {
            TxState::Confirmed(receipt) => extract_creation(&receipt),
            TxState::Reverted(_) => {
                warn!(hash = %handle.hash, "createSplitter reverted");
                Err(SplitterError::TransactionReverted { hash: handle.hash })
            }
            TxState::TimedOut => Err(SplitterError::Timeout { hash: handle.hash }),
            TxState::Pending => Err(SplitterError::Cancelled),
        }
    }
}

/// Build a [`CreationResult`] from the first decodable `SplitterCreated`
/// log of a confirmed receipt.
pub fn extract_creation(receipt: &TransactionReceipt) -> Result<CreationResult, SplitterError> {
    let hash = receipt.transaction_hash;
    let (position, event) =
        find_first_event::<SplitterCreated>(&receipt.logs).ok_or(SplitterError::EventNotFound {
            hash,
            event: "SplitterCreated",
        })?;
    debug!(%hash, position, splitter = %event.splitter, "SplitterCreated decoded");

    Ok(CreationResult {
        splitter: event.splitter,
        creator: event.creator,
        recipients: event.recipients,
        shares: event.shares,
        transaction_hash: hash,
        block_number: receipt.block_number(),
    })
}
