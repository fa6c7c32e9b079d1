//! Nullable chain client: scripted responses, recorded traffic.

use alloy_primitives::{Address, Bytes, TxHash, B256};
use alloy_sol_types::{SolCall, SolValue};
use splitter_chain::{ChainClient, ChainError, TransactionReceipt};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

type ReceiptResult = Result<Option<TransactionReceipt>, ChainError>;

/// A [`ChainClient`] that answers from a script.
///
/// - Reads are matched on `(contract, calldata)`; unscripted reads fail with
///   an RPC error so a test never silently reads a default.
/// - Writes return queued outcomes, or a fresh deterministic hash.
/// - Receipt polls replay a per-hash sequence whose last entry repeats;
///   hashes without a script stay pending forever.
///
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullChain {
    responses: Mutex<HashMap<(Address, Bytes), Result<Bytes, ChainError>>>,
    call_log: Mutex<Vec<(Address, Bytes)>>,
    send_outcomes: Mutex<VecDeque<Result<TxHash, ChainError>>>,
    sent: Mutex<Vec<(Address, Bytes)>>,
    receipts: Mutex<HashMap<TxHash, VecDeque<ReceiptResult>>>,
    receipt_polls: Mutex<HashMap<TxHash, usize>>,
    next_hash: AtomicU64,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            call_log: Mutex::new(Vec::new()),
            send_outcomes: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
            receipt_polls: Mutex::new(HashMap::new()),
            next_hash: AtomicU64::new(1),
        }
    }

    // ── Scripting ───────────────────────────────────────────────────────

    /// Answer `call` on `to` with `value`, ABI-encoded as the return data.
    pub fn respond<C: SolCall, V: SolValue>(&self, to: Address, call: &C, value: V) {
        self.respond_raw(to, call, Bytes::from(value.abi_encode()));
    }

    /// Answer `call` on `to` with raw return bytes.
    pub fn respond_raw<C: SolCall>(&self, to: Address, call: &C, output: Bytes) {
        self.responses
            .lock()
            .unwrap()
            .insert((to, Bytes::from(call.abi_encode())), Ok(output));
    }

    /// Fail `call` on `to` with `error`.
    pub fn fail_call<C: SolCall>(&self, to: Address, call: &C, error: ChainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((to, Bytes::from(call.abi_encode())), Err(error));
    }

    /// Queue the outcome of the next `send_transaction`.
    pub fn queue_send(&self, outcome: Result<TxHash, ChainError>) {
        self.send_outcomes.lock().unwrap().push_back(outcome);
    }

    /// Script the receipt polls for `hash`. The last entry repeats.
    pub fn push_receipts(&self, hash: TxHash, sequence: Vec<ReceiptResult>) {
        self.receipts
            .lock()
            .unwrap()
            .entry(hash)
            .or_default()
            .extend(sequence);
    }

    /// Make `hash` mined with `receipt` from the next poll on.
    pub fn mine(&self, hash: TxHash, receipt: TransactionReceipt) {
        self.push_receipts(hash, vec![Ok(Some(receipt))]);
    }

    /// Hash the next unscripted `send_transaction` will return.
    pub fn peek_next_hash(&self) -> TxHash {
        hash_for(self.next_hash.load(Ordering::SeqCst))
    }

    // ── Assertions ──────────────────────────────────────────────────────

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Number of reads of `call` on `to`.
    pub fn count_of<C: SolCall>(&self, to: Address, call: &C) -> usize {
        let key = (to, Bytes::from(call.abi_encode()));
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| **entry == key)
            .count()
    }

    /// Every transaction submitted, in order.
    pub fn sent(&self) -> Vec<(Address, Bytes)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn receipt_polls(&self, hash: TxHash) -> usize {
        self.receipt_polls
            .lock()
            .unwrap()
            .get(&hash)
            .copied()
            .unwrap_or(0)
    }

    /// Total reads, writes and receipt polls.
    pub fn total_requests(&self) -> usize {
        let polls: usize = self.receipt_polls.lock().unwrap().values().sum();
        self.call_count() + self.send_count() + polls
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_for(n: u64) -> TxHash {
    B256::left_padding_from(&n.to_be_bytes())
}

impl ChainClient for NullChain {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        self.call_log.lock().unwrap().push((to, data.clone()));
        let scripted = self.responses.lock().unwrap().get(&(to, data.clone())).cloned();
        scripted.unwrap_or_else(|| {
            Err(ChainError::Rpc(format!(
                "no response scripted for call to {to} with {data}"
            )))
        })
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxHash, ChainError> {
        self.sent.lock().unwrap().push((to, data));
        let queued = self.send_outcomes.lock().unwrap().pop_front();
        match queued {
            Some(outcome) => outcome,
            None => Ok(hash_for(self.next_hash.fetch_add(1, Ordering::SeqCst))),
        }
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ReceiptResult {
        *self.receipt_polls.lock().unwrap().entry(hash).or_insert(0) += 1;
        let mut receipts = self.receipts.lock().unwrap();
        match receipts.get_mut(&hash) {
            Some(sequence) if sequence.len() > 1 => sequence.pop_front().unwrap_or(Ok(None)),
            Some(sequence) => sequence.front().cloned().unwrap_or(Ok(None)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipts::success_receipt;
    use alloy_primitives::U256;
    use splitter_chain::contracts::ISimpleSplitter;
    use splitter_chain::read;

    #[tokio::test]
    async fn scripted_reads_decode_through_the_adapter() {
        let chain = NullChain::new();
        let splitter = Address::repeat_byte(0x11);
        chain.respond(splitter, &ISimpleSplitter::totalSharesCall {}, U256::from(100u64));

        let total = read(&chain, splitter, &ISimpleSplitter::totalSharesCall {})
            .await
            .unwrap();

        assert_eq!(total._0, U256::from(100u64));
        assert_eq!(chain.count_of(splitter, &ISimpleSplitter::totalSharesCall {}), 1);
    }

    #[tokio::test]
    async fn unscripted_reads_fail() {
        let chain = NullChain::new();
        let result = chain.call(Address::ZERO, Bytes::new()).await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
        assert_eq!(chain.call_count(), 1);
    }

    #[tokio::test]
    async fn sends_use_queue_then_fresh_hashes() {
        let chain = NullChain::new();
        chain.queue_send(Err(ChainError::NotConnected));

        let first = chain.send_transaction(Address::ZERO, Bytes::new()).await;
        let expected = chain.peek_next_hash();
        let second = chain.send_transaction(Address::ZERO, Bytes::new()).await;

        assert_eq!(first, Err(ChainError::NotConnected));
        assert_eq!(second, Ok(expected));
        assert_eq!(chain.send_count(), 2);
    }

    #[tokio::test]
    async fn last_receipt_entry_repeats() {
        let chain = NullChain::new();
        let hash = TxHash::repeat_byte(9);
        chain.push_receipts(hash, vec![Ok(None), Ok(Some(success_receipt(hash, vec![])))]);

        assert_eq!(chain.transaction_receipt(hash).await, Ok(None));
        for _ in 0..3 {
            assert!(chain.transaction_receipt(hash).await.unwrap().is_some());
        }
        assert_eq!(chain.receipt_polls(hash), 4);
        assert_eq!(chain.transaction_receipt(TxHash::ZERO).await, Ok(None));
    }
}
