//! Running premium total.

use rust_decimal::Decimal;

use super::numbers::round_cents;
use super::RowValues;
use crate::error::ExtractionError;
use crate::models::illustration::YearlyDataPoint;

/// Attaches the cumulative premium to rows in the order they are pushed.
///
/// One accumulator serves exactly one document; feeding rows out of
/// document order produces different cumulative values.
#[derive(Debug, Default)]
pub struct PremiumAccumulator {
    total: Decimal,
}

impl PremiumAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row's premium and return the finished data point.
    ///
    /// A premium that would overflow the running total is rejected and
    /// leaves the total untouched.
    pub fn push(&mut self, row: RowValues) -> Result<YearlyDataPoint, ExtractionError> {
        self.total = self
            .total
            .checked_add(row.annual_premium)
            .ok_or_else(|| ExtractionError::malformed(row.annual_premium.to_string()))?;

        Ok(YearlyDataPoint {
            age: row.age,
            annual_premium: row.annual_premium,
            cumulative_premium: round_cents(self.total),
            net_cash_value: row.net_cash_value,
            net_death_benefit: row.net_death_benefit,
        })
    }

    /// Running total so far, rounded to cents.
    pub fn total(&self) -> Decimal {
        round_cents(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row(age: u32, premium: &str) -> RowValues {
        RowValues {
            age,
            annual_premium: Decimal::from_str(premium).unwrap(),
            net_cash_value: 0,
            net_death_benefit: 0,
        }
    }

    #[test]
    fn test_running_total() {
        let mut acc = PremiumAccumulator::new();
        let premiums = ["1234.56", "1234.56", "0", "100.10"];

        let points: Vec<_> = premiums
            .iter()
            .enumerate()
            .map(|(i, p)| acc.push(row(45 + i as u32, p)).unwrap())
            .collect();

        let cumulative: Vec<String> = points
            .iter()
            .map(|p| p.cumulative_premium.to_string())
            .collect();
        assert_eq!(cumulative, vec!["1234.56", "2469.12", "2469.12", "2569.22"]);
        assert_eq!(acc.total(), Decimal::from_str("2569.22").unwrap());
    }

    #[test]
    fn test_prefix_sum_property() {
        let mut acc = PremiumAccumulator::new();
        let premiums = ["0.01", "999.99", "12.50", "0", "3333.33", "0.67"];
        let mut expected = Decimal::ZERO;
        let mut previous = Decimal::ZERO;

        for (i, p) in premiums.iter().enumerate() {
            let point = acc.push(row(30 + i as u32, p)).unwrap();
            expected += point.annual_premium;

            assert_eq!(point.cumulative_premium, round_cents(expected));
            assert!(point.cumulative_premium >= previous);
            previous = point.cumulative_premium;
        }
    }

    #[test]
    fn test_order_matters() {
        let mut forward = PremiumAccumulator::new();
        let first = forward.push(row(45, "100")).unwrap();

        let mut reversed = PremiumAccumulator::new();
        reversed.push(row(46, "50")).unwrap();
        let moved = reversed.push(row(45, "100")).unwrap();

        assert_ne!(first.cumulative_premium, moved.cumulative_premium);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut acc = PremiumAccumulator::new();
        acc.push(row(45, "50000000000000000000000000000")).unwrap();

        let err = acc.push(row(46, "50000000000000000000000000000")).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedNumber { .. }));
        assert_eq!(acc.total(), Decimal::from_str("50000000000000000000000000000").unwrap());

        let point = acc.push(row(47, "1")).unwrap();
        assert!(point.cumulative_premium > Decimal::from_str("50000000000000000000000000000").unwrap());
    }
}
