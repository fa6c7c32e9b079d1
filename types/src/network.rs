//! Network identifier and per-network deployment addresses.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Identifies which chain the client talks to.
///
/// Only networks with a deployed splitter factory are representable; any
/// other identifier is rejected when parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// Arbitrum Sepolia, the public test network.
    #[serde(rename = "arbitrum-sepolia")]
    ArbitrumSepolia,
    /// Arbitrum One, the production network.
    #[serde(rename = "arbitrum")]
    ArbitrumOne,
}

impl NetworkId {
    pub const ALL: [NetworkId; 2] = [NetworkId::ArbitrumSepolia, NetworkId::ArbitrumOne];

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::ArbitrumSepolia => 421_614,
            Self::ArbitrumOne => 42_161,
        }
    }

    /// Look up a network by chain id.
    pub fn from_chain_id(chain_id: u64) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|n| n.chain_id() == chain_id)
            .ok_or_else(|| TypeError::UnsupportedNetwork(chain_id.to_string()))
    }

    /// Human-readable name, also accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArbitrumSepolia => "arbitrum-sepolia",
            Self::ArbitrumOne => "arbitrum",
        }
    }

    /// Splitter factory deployment.
    pub fn factory_address(&self) -> Address {
        match self {
            Self::ArbitrumSepolia => address!("5b0adf5b6cd6e6e7e662f5eb51e165bae9bcd4a6"),
            Self::ArbitrumOne => address!("187c8493a0b4b21b4e7dab6c57e069dfa9785006"),
        }
    }

    /// Token whose balance the splitters distribute.
    pub fn token_address(&self) -> Address {
        match self {
            Self::ArbitrumSepolia => address!("637a1259c6afd7e3adf63993ca7e58bb438ab1b1"),
            Self::ArbitrumOne => address!("46850ad61c2b7d64d08c9c754f45254596696984"),
        }
    }

    /// Public JSON-RPC endpoint used when none is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::ArbitrumSepolia => "https://sepolia-rollup.arbitrum.io/rpc",
            Self::ArbitrumOne => "https://arb1.arbitrum.io/rpc",
        }
    }

    /// Block explorer base URL.
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Self::ArbitrumSepolia => "https://sepolia.arbiscan.io",
            Self::ArbitrumOne => "https://arbiscan.io",
        }
    }

    /// Explorer page for an address.
    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_url(), address.to_checksum(None))
    }

    /// Explorer page for a transaction.
    pub fn transaction_url(&self, hash: &alloy_primitives::TxHash) -> String {
        format!("{}/tx/{hash}", self.explorer_url())
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = TypeError;

    /// Accepts the network name or its decimal chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Some(network) = Self::ALL.into_iter().find(|n| n.as_str() == normalized) {
            return Ok(network);
        }
        match normalized.parse::<u64>() {
            Ok(chain_id) => Self::from_chain_id(chain_id),
            Err(_) => Err(TypeError::UnsupportedNetwork(s.to_string())),
        }
    }
}
