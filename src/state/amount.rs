//! Currency amounts.
//!
//! The ledger accounts in minor units (1 major unit = 10^8 minor units). All
//! amounts are held as integer minor units so a stake survives the trip to the
//! ledger without rounding. Conversion from decimal input truncates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minor units per major unit.
pub const MINOR_UNITS_PER_MAJOR: u64 = 100_000_000;

/// Fractional digits carried by a minor unit.
pub const MINOR_UNIT_DIGITS: usize = 8;

/// Errors parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is not a number: {0:?}")]
    NotANumber(String),

    #[error("Amount cannot be negative")]
    Negative,

    #[error("Amount is too large")]
    Overflow,
}

/// A non-negative amount in minor units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub const fn minor(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal string in major units, truncating past 8 fractional digits.
    ///
    /// Empty (or all-whitespace) input is zero, matching an empty stake field.
    pub fn parse_major(input: &str) -> Result<Self, AmountError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(Self::ZERO);
        }
        if text.starts_with('-') {
            return Err(AmountError::Negative);
        }
        let text = text.strip_prefix('+').unwrap_or(text);

        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        let not_a_number = || AmountError::NotANumber(input.to_string());
        if whole.is_empty() && fraction.is_empty() {
            return Err(not_a_number());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(not_a_number());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::Overflow)?
        };

        // Keep at most 8 digits, right-padded with zeros.
        let kept: String = fraction.chars().take(MINOR_UNIT_DIGITS).collect();
        let fraction_minor: u64 = if kept.is_empty() {
            0
        } else {
            let digits = kept.len();
            let value: u64 = kept.parse().map_err(|_| not_a_number())?;
            value * 10u64.pow((MINOR_UNIT_DIGITS - digits) as u32)
        };

        whole
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .and_then(|m| m.checked_add(fraction_minor))
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Value in major units.
    pub fn to_major(&self) -> f64 {
        minor_to_major(self.0 as i128)
    }

    /// Decimal string of minor units, as the ledger expects arguments.
    pub fn to_ledger_arg(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:08}",
            self.0 / MINOR_UNITS_PER_MAJOR,
            self.0 % MINOR_UNITS_PER_MAJOR
        )
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_major(s)
    }
}

/// Convert signed minor units to major units.
pub fn minor_to_major(minor: i128) -> f64 {
    minor as f64 / MINOR_UNITS_PER_MAJOR as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_major() {
        assert_eq!(Amount::parse_major("1").unwrap().minor(), 100_000_000);
        assert_eq!(Amount::parse_major("0.01").unwrap().minor(), 1_000_000);
        assert_eq!(Amount::parse_major(".5").unwrap().minor(), 50_000_000);
        assert_eq!(Amount::parse_major("2.").unwrap().minor(), 200_000_000);
        assert_eq!(Amount::parse_major("  ").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse_major("").unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_parse_truncates_extra_digits() {
        // 9th digit is dropped, not rounded
        let amount = Amount::parse_major("0.123456789").unwrap();
        assert_eq!(amount.minor(), 12_345_678);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Amount::parse_major("-1"), Err(AmountError::Negative));
        assert!(matches!(
            Amount::parse_major("abc"),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(
            Amount::parse_major("1.2.3"),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(
            Amount::parse_major("."),
            Err(AmountError::NotANumber(_))
        ));
        assert_eq!(
            Amount::parse_major("999999999999999"),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_round_trip_exact() {
        let stake = Amount::parse_major("0.125").unwrap();
        assert_eq!(stake.minor(), 12_500_000);
        assert_eq!(stake.to_major(), 0.125);
        assert_eq!(stake.to_string(), "0.12500000");
        assert_eq!(Amount::parse_major(&stake.to_string()).unwrap(), stake);
    }

    #[test]
    fn test_ledger_arg() {
        let amount = Amount::parse_major("0.01").unwrap();
        assert_eq!(amount.to_ledger_arg(), "1000000");
    }
}
