//! Chain client adapter.
//!
//! Everything that crosses the boundary to an EVM JSON-RPC node lives here:
//! - [`ChainClient`], the async seam the flows are written against
//! - [`read`] / [`write`], typed contract calls over any `ChainClient`
//! - [`JsonRpcClient`], the HTTP implementation
//! - receipt and log shapes, revert decoding, event decoding
//! - `sol!` bindings for the factory, splitter and token contracts

pub mod client;
pub mod contracts;
pub mod error;
pub mod events;
pub mod receipt;
pub mod revert;
pub mod rpc;

pub use client::{read, write, ChainClient, TransactionHandle};
pub use error::ChainError;
pub use events::{decode_if_matches, find_first_event};
pub use receipt::{Log, TransactionReceipt};
pub use revert::RevertReason;
pub use rpc::JsonRpcClient;
