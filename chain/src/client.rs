//! The async seam between the flows and a blockchain node.

use alloy_primitives::{Address, Bytes, TxHash};
use alloy_sol_types::SolCall;
use std::future::Future;

use crate::error::ChainError;
use crate::receipt::TransactionReceipt;

/// Raw chain access used by every flow.
///
/// Implementations must make `call` free of side effects so it can be
/// retried; only `send_transaction` changes chain state.
pub trait ChainClient: Send + Sync {
    /// Execute a read-only call against the latest block.
    fn call(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<Bytes, ChainError>> + Send;

    /// Sign and submit a transaction from the configured account.
    ///
    /// Fails with [`ChainError::NotConnected`] when no account is configured
    /// and with [`ChainError::Revert`] when the node's pre-flight simulation
    /// reverts.
    fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<TxHash, ChainError>> + Send;

    /// Fetch the receipt of a mined transaction; `None` while still pending.
    fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<Option<TransactionReceipt>, ChainError>> + Send;
}

/// A submitted transaction awaiting inclusion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionHandle {
    pub hash: TxHash,
}

impl TransactionHandle {
    pub fn new(hash: TxHash) -> Self {
        Self { hash }
    }
}

/// Call a view function and decode its return value.
pub async fn read<C, Cl>(client: &Cl, address: Address, call: &C) -> Result<C::Return, ChainError>
where
    C: SolCall,
    Cl: ChainClient,
{
    let output = client.call(address, Bytes::from(call.abi_encode())).await?;
    C::abi_decode_returns(&output, true).map_err(|e| ChainError::Decode {
        what: C::SIGNATURE.to_string(),
        message: e.to_string(),
    })
}

/// Submit a state-changing call and return its handle.
pub async fn write<C, Cl>(
    client: &Cl,
    address: Address,
    call: &C,
) -> Result<TransactionHandle, ChainError>
where
    C: SolCall,
    Cl: ChainClient,
{
    let hash = client
        .send_transaction(address, Bytes::from(call.abi_encode()))
        .await?;
    tracing::debug!(%hash, to = %address, function = C::SIGNATURE, "transaction submitted");
    Ok(TransactionHandle::new(hash))
}
