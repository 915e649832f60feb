//! Numeric normalization for illustration columns.
//!
//! Illustration tables print amounts with `,` thousands separators and an
//! optional `.` decimal part. Premium columns may instead carry the status
//! token "Paid Up", which counts as zero.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::patterns::{DECIMAL_NUMERAL, PAID_UP};
use crate::error::ExtractionError;

/// Parse an amount token ("12,345.67", "1,000", "$250.00", "Paid Up").
pub fn normalize_amount(token: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = token.trim();

    if PAID_UP.is_match(trimmed) {
        return Ok(Decimal::ZERO);
    }

    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if !DECIMAL_NUMERAL.is_match(&cleaned) {
        return Err(ExtractionError::malformed(token));
    }

    Decimal::from_str(&cleaned).map_err(|_| ExtractionError::malformed(token))
}

/// Parse an amount token into whole currency units, truncating any cents.
pub fn normalize_whole(token: &str) -> Result<i64, ExtractionError> {
    normalize_amount(token)?
        .trunc()
        .to_i64()
        .ok_or_else(|| ExtractionError::malformed(token))
}

/// Parse an age column.
pub fn normalize_age(token: &str) -> Result<u32, ExtractionError> {
    token
        .trim()
        .parse()
        .map_err(|_| ExtractionError::malformed(token))
}

/// Round a currency amount to cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("12,345.67"), Ok(dec("12345.67")));
        assert_eq!(normalize_amount("1,000"), Ok(dec("1000")));
        assert_eq!(normalize_amount("$250.00"), Ok(dec("250")));
        assert_eq!(normalize_amount(" 0.5 "), Ok(dec("0.5")));
        assert_eq!(normalize_amount(".75"), Ok(dec("0.75")));
    }

    #[test]
    fn test_normalize_paid_up() {
        assert_eq!(normalize_amount("Paid Up"), Ok(Decimal::ZERO));
        assert_eq!(normalize_amount("PAID UP"), Ok(Decimal::ZERO));
        assert_eq!(normalize_amount("paid   up"), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_normalize_malformed() {
        for token in ["1.2.3", "", ",", "abc", "12a", "Paid", "-5"] {
            assert_eq!(
                normalize_amount(token),
                Err(ExtractionError::malformed(token)),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_normalize_whole() {
        assert_eq!(normalize_whole("100,000"), Ok(100_000));
        assert_eq!(normalize_whole("1,234.99"), Ok(1_234));
        assert!(normalize_whole("99999999999999999999999999").is_err());
    }

    #[test]
    fn test_normalize_age() {
        assert_eq!(normalize_age("45"), Ok(45));
        assert!(normalize_age("4x").is_err());
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(dec("10.005")), dec("10.01"));
        assert_eq!(round_cents(dec("10.004")), dec("10.00"));
        assert_eq!(round_cents(dec("7")), dec("7"));
    }
}
