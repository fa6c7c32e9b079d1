//! Lifecycle of a tracked transaction.

use splitter_chain::TransactionReceipt;

/// `Pending` until exactly one of the terminal states is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxState {
    Pending,
    /// Mined with a success status.
    Confirmed(TransactionReceipt),
    /// Mined with a failure status.
    Reverted(TransactionReceipt),
    /// Not observed in a block within the configured timeout.
    TimedOut,
}

impl TxState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn receipt(&self) -> Option<&TransactionReceipt> {
        match self {
            Self::Confirmed(r) | Self::Reverted(r) => Some(r),
            Self::Pending | Self::TimedOut => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed(_) => "confirmed",
            Self::Reverted(_) => "reverted",
            Self::TimedOut => "timed out",
        }
    }
}
