//! Recipient shapes on both sides of the chain boundary.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::amount::TokenAmount;
use crate::error::TypeError;

/// One row of user input for splitter creation.
///
/// The address is kept as the raw string the user typed; it is only parsed
/// during validation so that errors can point at the offending entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientSpec {
    pub address: String,
    /// Whole percentage points.
    pub share: u64,
}

impl RecipientSpec {
    pub fn new(address: impl Into<String>, share: u64) -> Self {
        Self {
            address: address.into(),
            share,
        }
    }
}

impl FromStr for RecipientSpec {
    type Err = TypeError;

    /// Parses `<address>:<share>`, e.g. `0xabc…:50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidRecipient(s.to_string());
        let (address, share) = s.rsplit_once(':').ok_or_else(invalid)?;
        let share = share.trim().parse::<u64>().map_err(|_| invalid())?;
        Ok(Self::new(address.trim(), share))
    }
}

/// A recipient as read back from a deployed splitter, with its derived
/// entitlement against the splitter's current balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: Address,
    /// Raw on-chain share weight.
    pub share: U256,
    /// `share * 100 / totalShares`, floored.
    pub percentage: U256,
    /// `splitterBalance * share / totalShares`, floored.
    pub balance: TokenAmount,
}

/// A complete, consistent read of one splitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterSnapshot {
    pub address: Address,
    pub total_shares: U256,
    /// Token balance held by the splitter contract.
    pub balance: TokenAmount,
    /// Recipients in on-chain index order.
    pub recipients: Vec<Recipient>,
}

impl SplitterSnapshot {
    /// Sum of the per-recipient entitlements.
    pub fn allocated(&self) -> TokenAmount {
        self.recipients
            .iter()
            .fold(TokenAmount::ZERO, |acc, r| {
                acc.checked_add(r.balance).unwrap_or(self.balance)
            })
    }

    /// Part of the balance left over by floor division.
    ///
    /// This is an estimate; the contract decides what actually happens to it.
    pub fn remainder(&self) -> TokenAmount {
        self.balance.saturating_sub(self.allocated())
    }

    pub fn has_funds(&self) -> bool {
        !self.balance.is_zero()
    }
}
