//! HTTP JSON-RPC 2.0 implementation of [`ChainClient`].

use alloy_primitives::{Address, Bytes, TxHash, U64};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::client::ChainClient;
use crate::error::ChainError;
use crate::receipt::TransactionReceipt;
use crate::revert::RevertReason;

/// Extra gas added on top of the node's estimate, in percent.
const GAS_HEADROOM_PERCENT: u64 = 20;

/// JSON-RPC error code nodes use for execution reverts.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// HTTP client for an EVM node.
///
/// Wraps `reqwest::Client` with the endpoint URL and, optionally, the account
/// that signs transactions. Signing is delegated to the node
/// (`eth_sendTransaction`), so the account must be unlocked there.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    from: Option<Address>,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl JsonRpcClient {
    /// Create a read-only client targeting `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, ChainError> {
        Self::with_timeouts(url, Duration::from_secs(30), Duration::from_secs(10))
    }

    pub fn with_timeouts(
        url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ChainError::Rpc(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            from: None,
            next_id: AtomicU64::new(1),
        })
    }

    /// Use `from` as the signing account for writes.
    pub fn with_signer(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn signer(&self) -> Option<Address> {
        self.from
    }

    /// Chain id reported by the node.
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    /// Send one request and decode its `result`.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("{method}: request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ChainError::Rpc(format!(
                "{method}: node returned HTTP {}",
                response.status()
            )));
        }

        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Rpc(format!("{method}: invalid JSON response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(map_rpc_error(method, err));
        }

        serde_json::from_value(parsed.result.unwrap_or(Value::Null)).map_err(|e| {
            ChainError::Decode {
                what: format!("{method} result"),
                message: e.to_string(),
            }
        })
    }
}

/// Translate a JSON-RPC error object into the adapter's taxonomy.
fn map_rpc_error(method: &str, err: RpcErrorObject) -> ChainError {
    let looks_like_revert = err.code == EXECUTION_REVERTED_CODE
        || err.message.to_ascii_lowercase().contains("execution reverted");
    if !looks_like_revert {
        return ChainError::Rpc(format!("{method}: {} (code {})", err.message, err.code));
    }

    let data = match &err.data {
        Some(Value::String(hex)) => Some(hex.as_str()),
        Some(Value::Object(obj)) => obj.get("data").and_then(Value::as_str),
        _ => None,
    };
    let reason = match data {
        Some(hex) => RevertReason::decode_hex(hex),
        None => match err.message.split_once("execution reverted: ") {
            Some((_, msg)) if !msg.is_empty() => RevertReason::Message(msg.to_string()),
            _ => RevertReason::Unknown,
        },
    };
    ChainError::Revert(reason)
}

impl ChainClient for JsonRpcClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let mut tx = json!({ "to": to, "data": data });
        if let Some(from) = self.from {
            tx["from"] = json!(from);
        }
        self.request("eth_call", json!([tx, "latest"])).await
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxHash, ChainError> {
        let from = self.from.ok_or(ChainError::NotConnected)?;
        let mut tx = json!({ "from": from, "to": to, "data": data });

        // Estimation doubles as the pre-flight simulation: a revert surfaces here.
        let estimate: U64 = self.request("eth_estimateGas", json!([tx.clone()])).await?;
        let gas = estimate.to::<u64>().saturating_mul(100 + GAS_HEADROOM_PERCENT) / 100;
        tx["gas"] = json!(U64::from(gas));

        let hash: TxHash = self.request("eth_sendTransaction", json!([tx])).await?;
        tracing::info!(%hash, %from, %to, gas, "transaction sent");
        Ok(hash)
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ISplitterFactory;
    use alloy_primitives::{hex, U256};
    use alloy_sol_types::SolError;

    fn error(code: i64, message: &str, data: Option<Value>) -> RpcErrorObject {
        RpcErrorObject {
            code,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn plain_node_errors_are_rpc_errors() {
        let mapped = map_rpc_error("eth_call", error(-32000, "header not found", None));
        assert_eq!(
            mapped,
            ChainError::Rpc("eth_call: header not found (code -32000)".into())
        );
        assert!(mapped.is_transient());
    }

    #[test]
    fn revert_data_is_decoded() {
        let data = ISplitterFactory::InsufficientBalance {
            balance: U256::from(10u64),
            needed: U256::from(20u64),
        }
        .abi_encode();
        let hex_data = format!("0x{}", hex::encode(data));
        let mapped = map_rpc_error(
            "eth_estimateGas",
            error(3, "execution reverted", Some(Value::String(hex_data))),
        );
        assert_eq!(
            mapped,
            ChainError::Revert(RevertReason::InsufficientBalance {
                balance: U256::from(10u64),
                needed: U256::from(20u64),
            })
        );
        assert!(!mapped.is_transient());
    }

    #[test]
    fn nested_revert_data_object_is_decoded() {
        let hex_data = format!(
            "0x{}",
            hex::encode(ISplitterFactory::FailedDeployment {}.abi_encode())
        );
        let mapped = map_rpc_error(
            "eth_estimateGas",
            error(-32000, "execution reverted", Some(json!({ "data": hex_data }))),
        );
        assert_eq!(mapped, ChainError::Revert(RevertReason::FailedDeployment));
    }

    #[test]
    fn revert_message_without_data_is_kept() {
        let mapped = map_rpc_error(
            "eth_estimateGas",
            error(-32000, "execution reverted: nothing to distribute", None),
        );
        assert_eq!(
            mapped,
            ChainError::Revert(RevertReason::Message("nothing to distribute".into()))
        );

        let bare = map_rpc_error("eth_estimateGas", error(3, "execution reverted", None));
        assert_eq!(bare, ChainError::Revert(RevertReason::Unknown));
    }

    #[test]
    fn response_envelope_parses_null_result() {
        let parsed: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(parsed.error.is_none());
        let receipt: Option<TransactionReceipt> =
            serde_json::from_value(parsed.result.unwrap_or(Value::Null)).unwrap();
        assert!(receipt.is_none());
    }

    #[test]
    fn signer_is_opt_in() {
        let client = JsonRpcClient::new("http://127.0.0.1:8545").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:8545");
        assert_eq!(client.signer(), None);

        let client = client.with_signer(Address::repeat_byte(0xaa));
        assert_eq!(client.signer(), Some(Address::repeat_byte(0xaa)));
    }

    #[tokio::test]
    async fn writes_without_signer_fail_before_any_request() {
        // Unroutable URL: the call must short-circuit before touching the network.
        let client = JsonRpcClient::new("http://127.0.0.1:9").unwrap();
        let result = client
            .send_transaction(Address::ZERO, Bytes::new())
            .await;
        assert_eq!(result, Err(ChainError::NotConnected));
    }
}
