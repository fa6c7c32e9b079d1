//! Fundamental types for the splitter client.
//!
//! This crate defines the values shared across every other crate in the workspace:
//! account addresses, token amounts, supported networks, and the recipient /
//! snapshot shapes that flow between the chain adapter and the flows.

pub mod address;
pub mod amount;
pub mod error;
pub mod network;
pub mod recipient;

pub use address::{is_valid_address, parse_address, short_address, Address};
pub use alloy_primitives::{TxHash, U256};
pub use amount::{format_units, TokenAmount, TOKEN_DECIMALS, TOKEN_SYMBOL};
pub use error::TypeError;
pub use network::NetworkId;
pub use recipient::{Recipient, RecipientSpec, SplitterSnapshot};
