//! Error type for parsing and validating the shared types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address checksum mismatch: {0}")]
    BadChecksum(String),

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("invalid recipient entry {0:?}: expected <address>:<share>")]
    InvalidRecipient(String),
}
