//! Creation input checks. Pure; never touches the chain.

use alloy_primitives::{Address, U256};
use splitter_types::{parse_address, RecipientSpec};

use crate::constants::{MAX_RECIPIENTS, MAX_SHARE, MIN_RECIPIENTS, TOTAL_SHARES};
use crate::error::ValidationError;

/// Recipient arrays ready for `createSplitter`, index-aligned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRecipients {
    pub addresses: Vec<Address>,
    pub shares: Vec<U256>,
}

/// Check a creation set and convert it to ABI types.
///
/// Checks run in order: recipient count, then each row (address, then
/// share), then the share total. The first failure is returned.
pub fn validate_recipients(
    specs: &[RecipientSpec],
) -> Result<ValidatedRecipients, ValidationError> {
    if !(MIN_RECIPIENTS..=MAX_RECIPIENTS).contains(&specs.len()) {
        return Err(ValidationError::RecipientCount {
            count: specs.len(),
            min: MIN_RECIPIENTS,
            max: MAX_RECIPIENTS,
        });
    }

    let mut addresses = Vec::with_capacity(specs.len());
    let mut shares = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let address = parse_address(&spec.address).map_err(|_| ValidationError::InvalidAddress {
            index,
            address: spec.address.clone(),
        })?;
        if spec.share == 0 {
            return Err(ValidationError::ZeroShare { index });
        }
        if spec.share > MAX_SHARE {
            return Err(ValidationError::ShareTooLarge {
                index,
                share: spec.share,
                max: MAX_SHARE,
            });
        }
        addresses.push(address);
        shares.push(U256::from(spec.share));
    }

    let total = total_shares(specs);
    if total != TOTAL_SHARES {
        return Err(ValidationError::SharesTotal {
            total,
            expected: TOTAL_SHARES,
        });
    }

    Ok(ValidatedRecipients { addresses, shares })
}

/// Sum of the entered shares.
pub fn total_shares(specs: &[RecipientSpec]) -> u64 {
    specs.iter().fold(0u64, |acc, s| acc.saturating_add(s.share))
}

/// Default share for a newly added row: whatever is left of the total, but
/// at least 1.
pub fn suggest_next_share(specs: &[RecipientSpec]) -> u64 {
    TOTAL_SHARES.saturating_sub(total_shares(specs)).max(1)
}
