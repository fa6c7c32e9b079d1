//! Nullable infrastructure for deterministic testing.
//!
//! The flows only talk to the chain through
//! [`ChainClient`](splitter_chain::ChainClient). This crate provides a
//! scripted implementation that:
//! - Returns canned responses keyed by contract and calldata
//! - Replays receipt sequences per transaction hash
//! - Records every call so tests can assert on exact chain traffic
//! - Never touches the network
//!
//! Usage: build a [`NullChain`], script it, wrap it in an `Arc`, and hand it
//! to the component under test.

pub mod chain;
pub mod receipts;

pub use chain::NullChain;
pub use receipts::{failed_receipt, success_receipt};
