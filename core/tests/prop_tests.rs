use proptest::prelude::*;

use alloy_primitives::{Address, U256};
use splitter_core::{compute_entitlements, suggest_next_share, validate_recipients, ValidationError};
use splitter_types::RecipientSpec;

/// Split 100 into `n` positive parts driven by `cuts`.
fn shares_summing_to_100(n: usize, cuts: &[u64]) -> Vec<u64> {
    let mut points: Vec<u64> = cuts.iter().map(|c| 1 + c % 99).collect();
    points.sort_unstable();
    points.dedup();
    points.truncate(n - 1);
    let mut shares = Vec::with_capacity(points.len() + 1);
    let mut prev = 0;
    for p in points {
        shares.push(p - prev);
        prev = p;
    }
    shares.push(100 - prev);
    shares
}

fn rows(shares: &[u64]) -> Vec<RecipientSpec> {
    shares
        .iter()
        .enumerate()
        .map(|(i, s)| RecipientSpec::new(Address::repeat_byte(i as u8 + 1).to_string(), *s))
        .collect()
}

proptest! {
    /// Every 2–10 entry set of positive shares summing to 100 is accepted.
    #[test]
    fn valid_sets_pass(n in 2usize..=10, cuts in prop::collection::vec(any::<u64>(), 9)) {
        let shares = shares_summing_to_100(n, &cuts);
        prop_assume!(shares.len() >= 2);
        let validated = validate_recipients(&rows(&shares)).unwrap();
        prop_assert_eq!(validated.shares.len(), shares.len());
    }

    /// A set whose shares do not total 100 is always rejected.
    #[test]
    fn wrong_totals_fail(shares in prop::collection::vec(1u64..=100, 2..=10)) {
        let total: u64 = shares.iter().sum();
        prop_assume!(total != 100);
        prop_assert_eq!(
            validate_recipients(&rows(&shares)),
            Err(ValidationError::SharesTotal { total, expected: 100 })
        );
    }

    /// A suggested share is always within 1..=100.
    #[test]
    fn suggested_share_in_range(shares in prop::collection::vec(0u64..=200, 0..=10)) {
        let next = suggest_next_share(&rows(&shares));
        prop_assert!((1..=100).contains(&next));
    }

    /// Entitlements never add up to more than the balance and each is the
    /// floor of balance * share / total.
    #[test]
    fn entitlements_never_exceed_balance(
        shares in prop::collection::vec(1u64..=1_000, 1..=20),
        slack in 0u64..1_000,
        balance in any::<u128>(),
    ) {
        let total = U256::from(shares.iter().sum::<u64>() + slack);
        let balance = U256::from(balance);
        let entries: Vec<_> = shares
            .iter()
            .enumerate()
            .map(|(i, s)| (Address::repeat_byte(i as u8), U256::from(*s)))
            .collect();

        let recipients = compute_entitlements(&entries, total, balance).unwrap();

        let allocated = recipients
            .iter()
            .fold(U256::ZERO, |acc, r| acc + r.balance.raw());
        prop_assert!(allocated <= balance);
        for (r, (_, share)) in recipients.iter().zip(&entries) {
            prop_assert_eq!(r.balance.raw(), balance * *share / total);
            prop_assert!(r.percentage <= U256::from(100u64));
        }
    }
}
