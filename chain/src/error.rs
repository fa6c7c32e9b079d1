//! Chain adapter error types.

use thiserror::Error;

use crate::revert::RevertReason;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("no signer account configured")]
    NotConnected,

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("execution reverted: {0}")]
    Revert(RevertReason),

    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },
}

impl ChainError {
    /// Transport and node failures; safe to retry a read or a receipt poll.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Rpc(_))
    }
}
