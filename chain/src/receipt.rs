//! Receipt and log shapes as returned by `eth_getTransactionReceipt`.

use alloy_primitives::{Address, Bytes, TxHash, B256, U256, U64};
use alloy_sol_types::SolEvent;
use serde::{Deserialize, Serialize};

/// A log emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Contract that emitted the log.
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub log_index: Option<U64>,
}

impl Log {
    /// Build a log carrying an ABI-encoded event, as the given contract would emit it.
    pub fn from_event<E: SolEvent>(address: Address, event: &E) -> Self {
        let encoded = event.encode_log_data();
        Self {
            address,
            topics: encoded.topics().to_vec(),
            data: encoded.data,
            log_index: None,
        }
    }
}

/// The chain's record of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` on success, `0` on failure.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U256>,
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// A receipt without a status field is treated as failed.
    pub fn is_success(&self) -> bool {
        self.status == Some(U64::from(1))
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT_JSON: &str = r#"{
        "transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
        "blockNumber": "0x10",
        "status": "0x1",
        "gasUsed": "0x5208",
        "from": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        "cumulativeGasUsed": "0x5208",
        "logs": [
            {
                "address": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
                "topics": ["0x2222222222222222222222222222222222222222222222222222222222222222"],
                "data": "0x",
                "logIndex": "0x0",
                "removed": false
            }
        ]
    }"#;

    #[test]
    fn deserializes_node_receipt() {
        let receipt: TransactionReceipt = serde_json::from_str(RECEIPT_JSON).unwrap();
        assert!(receipt.is_success());
        assert_eq!(receipt.block_number(), Some(16));
        assert_eq!(receipt.gas_used, Some(U256::from(21_000u64)));
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].log_index, Some(U64::from(0)));
        assert!(receipt.logs[0].data.is_empty());
    }

    #[test]
    fn zero_or_missing_status_is_failure() {
        let mut receipt: TransactionReceipt = serde_json::from_str(RECEIPT_JSON).unwrap();
        receipt.status = Some(U64::ZERO);
        assert!(!receipt.is_success());
        receipt.status = None;
        assert!(!receipt.is_success());
    }
}
