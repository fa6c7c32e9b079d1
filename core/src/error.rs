//! Error taxonomy for the splitter flows.

use alloy_primitives::TxHash;
use splitter_chain::{ChainError, RevertReason};
use splitter_tracker::TrackerError;
use splitter_types::TypeError;
use thiserror::Error;

/// Rejected creation input. Raised before any chain access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected between {min} and {max} recipients, got {count}")]
    RecipientCount { count: usize, min: usize, max: usize },

    #[error("recipient #{index}: invalid address {address:?}")]
    InvalidAddress { index: usize, address: String },

    #[error("recipient #{index}: share must be greater than zero")]
    ZeroShare { index: usize },

    #[error("recipient #{index}: share {share} exceeds the maximum of {max}")]
    ShareTooLarge { index: usize, share: u64, max: u64 },

    #[error("shares must add up to exactly {expected}, got {total}")]
    SharesTotal { total: u64, expected: u64 },

    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitterError {
    #[error("invalid recipients: {0}")]
    Validation(#[from] ValidationError),

    #[error("no signer account configured")]
    NotConnected,

    #[error("RPC error: {0}")]
    Rpc(String),

    /// Rejected by the node's pre-flight simulation; nothing was broadcast.
    #[error("transaction would revert: {0}")]
    Revert(RevertReason),

    /// Mined with a failure status.
    #[error("transaction {hash} reverted")]
    TransactionReverted { hash: TxHash },

    #[error("transaction {hash} succeeded but emitted no {event} event")]
    EventNotFound { hash: TxHash, event: &'static str },

    /// Not mined in time. The transaction may still land later.
    #[error("transaction {hash} was not mined before the timeout")]
    Timeout { hash: TxHash },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("splitter has no balance to distribute")]
    NothingToDistribute,

    #[error("inconsistent on-chain data: {0}")]
    DataIntegrity(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("a {0} transaction is already in flight")]
    Busy(&'static str),

    #[error("transaction tracking was cancelled")]
    Cancelled,
}

/// Coarse classification used for reporting and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotConnected,
    Rpc,
    Revert,
    EventNotFound,
    Timeout,
    InvalidAddress,
    NothingToDistribute,
    DataIntegrity,
    Config,
    Busy,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotConnected => "not_connected",
            Self::Rpc => "rpc",
            Self::Revert => "revert",
            Self::EventNotFound => "event_not_found",
            Self::Timeout => "timeout",
            Self::InvalidAddress => "invalid_address",
            Self::NothingToDistribute => "nothing_to_distribute",
            Self::DataIntegrity => "data_integrity",
            Self::Config => "config",
            Self::Busy => "busy",
            Self::Cancelled => "cancelled",
        }
    }
}

impl SplitterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::Rpc(_) => ErrorKind::Rpc,
            Self::Revert(_) | Self::TransactionReverted { .. } => ErrorKind::Revert,
            Self::EventNotFound { .. } => ErrorKind::EventNotFound,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidAddress(_) => ErrorKind::InvalidAddress,
            Self::NothingToDistribute => ErrorKind::NothingToDistribute,
            Self::DataIntegrity(_) => ErrorKind::DataIntegrity,
            Self::Config(_) => ErrorKind::Config,
            Self::Busy(_) => ErrorKind::Busy,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether the user can reasonably try the same action again.
    ///
    /// A timed-out write may still be mined; callers should check the
    /// splitter state before resubmitting.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Rpc | ErrorKind::Timeout)
    }
}

impl From<ChainError> for SplitterError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::NotConnected => Self::NotConnected,
            ChainError::Rpc(msg) => Self::Rpc(msg),
            ChainError::Revert(reason) => Self::Revert(reason),
            ChainError::Decode { what, message } => {
                Self::DataIntegrity(format!("undecodable {what}: {message}"))
            }
        }
    }
}

impl From<TrackerError> for SplitterError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TypeError> for SplitterError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::InvalidAddress(s) | TypeError::BadChecksum(s) => Self::InvalidAddress(s),
            TypeError::UnsupportedNetwork(s) => Self::Config(format!("unsupported network {s}")),
            TypeError::InvalidRecipient(entry) => Self::Validation(ValidationError::Malformed(
                format!("invalid recipient entry {entry:?}: expected <address>:<share>"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_errors_keep_their_category() {
        assert_eq!(SplitterError::from(ChainError::NotConnected), SplitterError::NotConnected);
        assert_eq!(
            SplitterError::from(ChainError::Revert(RevertReason::FailedDeployment)).kind(),
            ErrorKind::Revert
        );
        let decode = SplitterError::from(ChainError::Decode {
            what: "totalShares()".into(),
            message: "buffer overrun".into(),
        });
        assert_eq!(decode.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn only_transport_failures_and_timeouts_are_retryable() {
        assert!(SplitterError::Rpc("502".into()).is_retryable());
        assert!(SplitterError::Timeout { hash: TxHash::ZERO }.is_retryable());
        assert!(!SplitterError::NotConnected.is_retryable());
        assert!(!SplitterError::NothingToDistribute.is_retryable());
        assert!(!SplitterError::TransactionReverted { hash: TxHash::ZERO }.is_retryable());
        assert!(!SplitterError::Validation(ValidationError::ZeroShare { index: 0 }).is_retryable());
    }

    #[test]
    fn type_errors_map_to_flow_errors() {
        let bad = SplitterError::from(TypeError::BadChecksum("0xAbC".into()));
        assert_eq!(bad, SplitterError::InvalidAddress("0xAbC".into()));
        let net = SplitterError::from(TypeError::UnsupportedNetwork("goerli".into()));
        assert_eq!(net.kind(), ErrorKind::Config);
        let row = SplitterError::from(TypeError::InvalidRecipient("0xabc".into()));
        assert_eq!(row.kind(), ErrorKind::Validation);
    }
}
