//! Splitter state aggregation.
//!
//! One call to [`SplitterReader::read_splitter`] is one fetch cycle: the
//! recipient count first, then every other read at once, then the derived
//! entitlements. Any failed read fails the whole cycle.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use futures_util::future::try_join_all;
use splitter_chain::contracts::{ISimpleSplitter, IERC20};
use splitter_chain::{read, ChainClient};
use splitter_types::{parse_address, Recipient, SplitterSnapshot, TokenAmount};
use tracing::debug;

use crate::constants::MAX_READ_RECIPIENTS;
use crate::error::SplitterError;

/// Reads splitters that pay out `token`.
pub struct SplitterReader<C> {
    client: Arc<C>,
    token: Address,
}

impl<C: ChainClient> SplitterReader<C> {
    pub fn new(client: Arc<C>, token: Address) -> Self {
        Self { client, token }
    }

    pub fn token(&self) -> Address {
        self.token
    }

    /// Parse `raw` and read the splitter at that address.
    ///
    /// An unparseable address fails with [`SplitterError::InvalidAddress`]
    /// before any chain access.
    pub async fn read_splitter(&self, raw: &str) -> Result<SplitterSnapshot, SplitterError> {
        let address =
            parse_address(raw).map_err(|_| SplitterError::InvalidAddress(raw.to_string()))?;
        self.read_snapshot(address).await
    }

    pub async fn read_snapshot(
        &self,
        splitter: Address,
    ) -> Result<SplitterSnapshot, SplitterError> {
        let client = self.client.as_ref();
        let count = read(client, splitter, &ISimpleSplitter::recipientCountCall {})
            .await?
            ._0;
        let count = checked_count(count)?;
        debug!(%splitter, count, "reading splitter");

        let entries = try_join_all((0..count).map(|index| self.read_entry(splitter, index)));
        let (total_shares, balance, entries) = tokio::try_join!(
            self.read_total_shares(splitter),
            self.read_balance(splitter),
            entries,
        )?;

        let recipients = compute_entitlements(&entries, total_shares, balance)?;
        debug!(%splitter, %total_shares, %balance, "splitter read");
        Ok(SplitterSnapshot {
            address: splitter,
            total_shares,
            balance: TokenAmount::new(balance),
            recipients,
        })
    }

    async fn read_entry(
        &self,
        splitter: Address,
        index: usize,
    ) -> Result<(Address, U256), SplitterError> {
        let client = self.client.as_ref();
        let index = U256::from(index);
        let recipient_call = ISimpleSplitter::recipientsCall { index };
        let share_call = ISimpleSplitter::sharesCall { index };
        let (address, share) = tokio::try_join!(
            read(client, splitter, &recipient_call),
            read(client, splitter, &share_call),
        )?;
        Ok((address._0, share._0))
    }

    async fn read_total_shares(&self, splitter: Address) -> Result<U256, SplitterError> {
        let call = ISimpleSplitter::totalSharesCall {};
        let ret = read(self.client.as_ref(), splitter, &call).await?;
        Ok(ret._0)
    }

    async fn read_balance(&self, splitter: Address) -> Result<U256, SplitterError> {
        let call = IERC20::balanceOfCall { account: splitter };
        let ret = read(self.client.as_ref(), self.token, &call).await?;
        Ok(ret._0)
    }
}

fn checked_count(count: U256) -> Result<usize, SplitterError> {
    if count > U256::from(MAX_READ_RECIPIENTS) {
        return Err(SplitterError::DataIntegrity(format!(
            "recipientCount {count} exceeds {MAX_READ_RECIPIENTS}"
        )));
    }
    Ok(count.to::<usize>())
}

/// Derive each recipient's percentage and share of `balance`.
///
/// Both use floor division, so the sum of entitlements can be below
/// `balance`; the difference is left as is.
pub fn compute_entitlements(
    entries: &[(Address, U256)],
    total_shares: U256,
    balance: U256,
) -> Result<Vec<Recipient>, SplitterError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    if total_shares.is_zero() {
        return Err(SplitterError::DataIntegrity(format!(
            "totalShares is zero with {} recipients",
            entries.len()
        )));
    }

    let share_sum = entries
        .iter()
        .try_fold(U256::ZERO, |acc, (_, share)| acc.checked_add(*share))
        .ok_or_else(|| SplitterError::DataIntegrity("recipient shares overflow".into()))?;
    if share_sum > total_shares {
        return Err(SplitterError::DataIntegrity(format!(
            "recipient shares add up to {share_sum}, above totalShares {total_shares}"
        )));
    }

    let hundred = U256::from(100u64);
    entries
        .iter()
        .map(|(address, share)| {
            let overflow = || {
                SplitterError::DataIntegrity(format!("entitlement of {address} overflows"))
            };
            let percentage = share.checked_mul(hundred).ok_or_else(overflow)? / total_shares;
            let amount = balance.checked_mul(*share).ok_or_else(overflow)? / total_shares;
            Ok(Recipient {
                address: *address,
                share: *share,
                percentage,
                balance: TokenAmount::new(amount),
            })
        })
        .collect()
}
