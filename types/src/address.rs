//! Account address parsing and display.

use std::str::FromStr;

pub use alloy_primitives::Address;

use crate::error::TypeError;

/// Parse a user-supplied account address.
///
/// The input must be `0x` followed by exactly 40 hex digits. All-lowercase
/// digits are accepted as-is; any uppercase digit means the input must carry
/// a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address, TypeError> {
    let invalid = || TypeError::InvalidAddress(raw.to_string());

    let digits = raw.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    if digits.bytes().any(|b| b.is_ascii_uppercase()) {
        Address::parse_checksummed(raw, None)
            .map_err(|_| TypeError::BadChecksum(raw.to_string()))
    } else {
        Address::from_str(raw).map_err(|_| invalid())
    }
}

/// Whether `raw` would be accepted by [`parse_address`].
pub fn is_valid_address(raw: &str) -> bool {
    parse_address(raw).is_ok()
}

/// Abbreviated checksummed form used in tables: `0x5aAe...eAed`.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn accepts_valid_checksum() {
        let addr = parse_address(CHECKSUMMED).unwrap();
        assert_eq!(addr.to_checksum(None), CHECKSUMMED);
    }

    #[test]
    fn accepts_lowercase_without_checksum() {
        let lower = CHECKSUMMED.to_lowercase();
        assert_eq!(parse_address(&lower).unwrap(), parse_address(CHECKSUMMED).unwrap());
    }

    #[test]
    fn uppercase_needs_a_checksum() {
        let upper = format!("0x{}", &CHECKSUMMED[2..].to_uppercase());
        assert_eq!(parse_address(&upper), Err(TypeError::BadChecksum(upper.clone())));
    }

    #[test]
    fn rejects_bad_checksum() {
        let tampered = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(
            parse_address(tampered),
            Err(TypeError::BadChecksum(tampered.to_string()))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "",
            "0x",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed00",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beazz",
            "0X5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(!is_valid_address(raw), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn short_form_keeps_prefix_and_suffix() {
        let addr = parse_address(CHECKSUMMED).unwrap();
        assert_eq!(short_address(&addr), "0x5aAe...eAed");
    }
}
