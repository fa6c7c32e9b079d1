use proptest::prelude::*;

use splitter_types::{format_units, parse_address, Address, NetworkId, U256};

proptest! {
    /// Any lowercase 40-digit hex string is a valid address and parses to the same bytes.
    #[test]
    fn lowercase_hex_addresses_parse(bytes in prop::array::uniform20(0u8..)) {
        let raw = format!("0x{}", bytes.iter().map(|b| format!("{b:02x}")).collect::<String>());
        let parsed = parse_address(&raw).unwrap();
        prop_assert_eq!(parsed, Address::from(bytes));
    }

    /// The checksummed rendering of any address parses back to itself.
    #[test]
    fn checksummed_addresses_parse(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::from(bytes);
        let parsed = parse_address(&addr.to_checksum(None)).unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// format_units keeps the whole part intact and never emits trailing fractional zeros.
    #[test]
    fn format_units_splits_whole_and_fraction(
        whole in 0u64..1_000_000_000,
        frac in 0u64..1_000_000,
    ) {
        let raw = U256::from(whole) * U256::from(1_000_000u64) + U256::from(frac);
        let rendered = format_units(raw, 6);
        match rendered.split_once('.') {
            Some((w, f)) => {
                prop_assert_eq!(w, whole.to_string());
                prop_assert!(!f.ends_with('0'));
                prop_assert!(f.len() <= 6);
                prop_assert!(frac != 0);
            }
            None => {
                prop_assert_eq!(rendered, whole.to_string());
                prop_assert_eq!(frac, 0);
            }
        }
    }

    /// Only the two deployed chain ids resolve to a network.
    #[test]
    fn only_known_chain_ids_resolve(chain_id in any::<u64>()) {
        let resolved = NetworkId::from_chain_id(chain_id);
        prop_assert_eq!(resolved.is_ok(), chain_id == 42_161 || chain_id == 421_614);
    }
}
