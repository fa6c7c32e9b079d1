//! Revert payload decoding.

use alloy_primitives::{hex, Bytes, U256};
use alloy_sol_types::{Panic, Revert, SolError, SolInterface};
use std::fmt;

use crate::contracts::ISplitterFactory::ISplitterFactoryErrors;

/// Why a call or transaction reverted, decoded as far as the known ABIs allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// The factory could not deploy the clone.
    FailedDeployment,
    /// The factory's `InsufficientBalance(balance, needed)` custom error.
    InsufficientBalance { balance: U256, needed: U256 },
    /// `Error(string)` from `require`/`revert` with a message.
    Message(String),
    /// `Panic(uint256)` from a failed assertion or arithmetic fault.
    Panic(U256),
    /// Revert data that matches none of the known selectors.
    Raw(Bytes),
    /// The node reported a revert without any data.
    Unknown,
}

impl RevertReason {
    pub fn decode(data: &[u8]) -> Self {
        if data.is_empty() {
            return Self::Unknown;
        }
        if let Ok(err) = ISplitterFactoryErrors::abi_decode(data, true) {
            return match err {
                ISplitterFactoryErrors::FailedDeployment(_) => Self::FailedDeployment,
                ISplitterFactoryErrors::InsufficientBalance(e) => Self::InsufficientBalance {
                    balance: e.balance,
                    needed: e.needed,
                },
            };
        }
        if let Ok(revert) = Revert::abi_decode(data, true) {
            return Self::Message(revert.reason);
        }
        if let Ok(panic) = Panic::abi_decode(data, true) {
            return Self::Panic(panic.code);
        }
        Self::Raw(Bytes::copy_from_slice(data))
    }

    /// Decode the hex string a node attaches to a revert error.
    pub fn decode_hex(data: &str) -> Self {
        match hex::decode(data) {
            Ok(bytes) => Self::decode(&bytes),
            Err(_) => Self::Unknown,
        }
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailedDeployment => write!(f, "FailedDeployment()"),
            Self::InsufficientBalance { balance, needed } => {
                write!(f, "InsufficientBalance(balance: {balance}, needed: {needed})")
            }
            Self::Message(msg) => write!(f, "{msg}"),
            Self::Panic(code) => write!(f, "panic code {code:#x}"),
            Self::Raw(data) => write!(f, "unrecognised revert data {data}"),
            Self::Unknown => write!(f, "no reason given"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ISplitterFactory;

    #[test]
    fn decodes_factory_custom_errors() {
        let data = ISplitterFactory::InsufficientBalance {
            balance: U256::from(1u64),
            needed: U256::from(5u64),
        }
        .abi_encode();
        assert_eq!(
            RevertReason::decode(&data),
            RevertReason::InsufficientBalance {
                balance: U256::from(1u64),
                needed: U256::from(5u64)
            }
        );

        let data = ISplitterFactory::FailedDeployment {}.abi_encode();
        assert_eq!(RevertReason::decode(&data), RevertReason::FailedDeployment);
    }

    #[test]
    fn decodes_error_string_and_panic() {
        let data = Revert {
            reason: "shares mismatch".into(),
        }
        .abi_encode();
        assert_eq!(
            RevertReason::decode(&data),
            RevertReason::Message("shares mismatch".into())
        );

        let data = Panic {
            code: U256::from(0x11u64),
        }
        .abi_encode();
        assert_eq!(RevertReason::decode(&data), RevertReason::Panic(U256::from(0x11u64)));
    }

    #[test]
    fn unknown_selector_is_kept_raw() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(
            RevertReason::decode(&data),
            RevertReason::Raw(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]))
        );
        assert_eq!(RevertReason::decode(&[]), RevertReason::Unknown);
    }

    #[test]
    fn decodes_hex_with_prefix() {
        let encoded = format!(
            "0x{}",
            hex::encode(ISplitterFactory::FailedDeployment {}.abi_encode())
        );
        assert_eq!(RevertReason::decode_hex(&encoded), RevertReason::FailedDeployment);
        assert_eq!(RevertReason::decode_hex("0xzz"), RevertReason::Unknown);
    }

    #[test]
    fn display_names_the_custom_error() {
        let reason = RevertReason::InsufficientBalance {
            balance: U256::from(3u64),
            needed: U256::from(9u64),
        };
        assert_eq!(reason.to_string(), "InsufficientBalance(balance: 3, needed: 9)");
    }
}
