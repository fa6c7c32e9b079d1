//! Token amounts.
//!
//! Amounts are raw 256-bit integers in the token's smallest unit. They are
//! never converted to floating point; [`format_units`] renders them for
//! display by decimal string arithmetic only.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal precision of the splitter's token (PYUSD).
pub const TOKEN_DECIMALS: u8 = 6;

/// Display symbol of the splitter's token.
pub const TOKEN_SYMBOL: &str = "PYUSD";

/// An amount of the splitter's token, in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(U256::from(raw))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Human-readable decimal value without the symbol, e.g. `"1.5"`.
    pub fn to_decimal_string(&self) -> String {
        format_units(self.0, TOKEN_DECIMALS)
    }
}

impl From<U256> for TokenAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), TOKEN_SYMBOL)
    }
}

/// Render a raw integer with `decimals` implied decimal places.
///
/// Trailing fractional zeros are dropped, and a whole number has no
/// decimal point: `1_500_000` with 6 decimals is `"1.5"`, `2_000_000` is `"2"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / base;
    let frac = value % base;
    if frac.is_zero() {
        return whole.to_string();
    }
    let padded = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}
