//! Age-aligned comparison of two illustrations.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::illustration::{ParseResult, YearlyDataPoint};

/// Values of one illustration at one age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeValues {
    #[serde(with = "rust_decimal::serde::float")]
    pub cumulative_premium: Decimal,
    pub net_cash_value: i64,
    pub net_death_benefit: i64,
    /// Premium paid since the previous aligned age.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_premium: Decimal,
    /// Cash value change since the previous aligned age.
    pub cash_value_growth: i64,
}

/// One age on the shared axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub age: u32,
    pub left: Option<AgeValues>,
    pub right: Option<AgeValues>,
}

/// Two illustrations aligned on the union of their ages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Shared age axis, ascending.
    pub fn ages(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.age).collect()
    }
}

/// Align two illustrations by age.
///
/// Annual figures are differences against the previous age on the shared
/// axis. When that age is missing from a side, the difference is taken
/// from zero.
pub fn compare(left: &ParseResult, right: &ParseResult) -> Comparison {
    let ages: BTreeSet<u32> = left
        .yearly_data
        .iter()
        .chain(right.yearly_data.iter())
        .map(|p| p.age)
        .collect();

    let left = align(left, &ages);
    let right = align(right, &ages);

    let rows = ages
        .iter()
        .zip(left.into_iter().zip(right))
        .map(|(&age, (left, right))| ComparisonRow { age, left, right })
        .collect();

    Comparison { rows }
}

fn align(result: &ParseResult, ages: &BTreeSet<u32>) -> Vec<Option<AgeValues>> {
    // Later rows win when an age repeats.
    let by_age: BTreeMap<u32, &YearlyDataPoint> =
        result.yearly_data.iter().map(|p| (p.age, p)).collect();

    let mut previous: Option<&YearlyDataPoint> = None;
    let mut aligned = Vec::with_capacity(ages.len());

    for age in ages {
        let current = by_age.get(age).copied();
        aligned.push(current.map(|point| {
            let (prev_premium, prev_cash) = previous
                .map(|p| (p.cumulative_premium, p.net_cash_value))
                .unwrap_or((Decimal::ZERO, 0));

            AgeValues {
                cumulative_premium: point.cumulative_premium,
                net_cash_value: point.net_cash_value,
                net_death_benefit: point.net_death_benefit,
                annual_premium: point.cumulative_premium - prev_premium,
                cash_value_growth: point.net_cash_value - prev_cash,
            }
        }));
        previous = current;
    }

    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(age: u32, cumulative: i64, cash: i64) -> YearlyDataPoint {
        YearlyDataPoint {
            age,
            annual_premium: Decimal::from(1000),
            cumulative_premium: Decimal::from(cumulative),
            net_cash_value: cash,
            net_death_benefit: 100_000,
        }
    }

    #[test]
    fn test_union_of_ages_sorted() {
        let left = ParseResult {
            yearly_data: vec![point(46, 2000, 500), point(45, 1000, 0)],
        };
        let right = ParseResult {
            yearly_data: vec![point(44, 800, 0), point(46, 2400, 900)],
        };

        let comparison = compare(&left, &right);
        assert_eq!(comparison.ages(), vec![44, 45, 46]);
        assert!(comparison.rows[0].left.is_none());
        assert!(comparison.rows[1].right.is_none());
    }

    #[test]
    fn test_annual_differences() {
        let left = ParseResult {
            yearly_data: vec![point(45, 1000, 0), point(46, 2000, 700), point(47, 3000, 1600)],
        };
        let comparison = compare(&left, &ParseResult::empty());

        let values: Vec<_> = comparison
            .rows
            .iter()
            .map(|r| {
                let v = r.left.as_ref().unwrap();
                (v.annual_premium, v.cash_value_growth)
            })
            .collect();

        assert_eq!(
            values,
            vec![
                (Decimal::from(1000), 0),
                (Decimal::from(1000), 700),
                (Decimal::from(1000), 900),
            ]
        );
        assert!(comparison.rows.iter().all(|r| r.right.is_none()));
    }

    #[test]
    fn test_gap_measures_from_zero() {
        let left = ParseResult {
            yearly_data: vec![point(45, 1000, 100), point(47, 3000, 1600)],
        };
        let right = ParseResult {
            yearly_data: vec![point(46, 500, 0)],
        };

        let comparison = compare(&left, &right);
        let at_47 = comparison.rows[2].left.as_ref().unwrap();
        assert_eq!(at_47.annual_premium, Decimal::from(3000));
        assert_eq!(at_47.cash_value_growth, 1600);
    }

    #[test]
    fn test_empty() {
        let comparison = compare(&ParseResult::empty(), &ParseResult::empty());
        assert!(comparison.rows.is_empty());
    }
}
