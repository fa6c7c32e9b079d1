//! Receipt builders for scripted transactions.

use alloy_primitives::{Address, TxHash, U256, U64};
use splitter_chain::{Log, TransactionReceipt};

fn receipt(hash: TxHash, status: u64, logs: Vec<Log>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: hash,
        block_number: Some(U64::from(1)),
        status: Some(U64::from(status)),
        gas_used: Some(U256::from(21_000u64)),
        from: Some(Address::ZERO),
        logs,
    }
}

/// A mined receipt with success status carrying `logs`.
pub fn success_receipt(hash: TxHash, logs: Vec<Log>) -> TransactionReceipt {
    receipt(hash, 1, logs)
}

/// A mined receipt with failure status.
pub fn failed_receipt(hash: TxHash) -> TransactionReceipt {
    receipt(hash, 0, Vec::new())
}
