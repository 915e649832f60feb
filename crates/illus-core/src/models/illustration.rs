//! Illustration data models.
//!
//! The serialized shape of [`ParseResult`] is what downstream chart
//! renderers consume, so field names here are part of the wire contract.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Policy family of an illustration document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFamily {
    /// Level term policy ("Accelerator 20").
    TermLife,
    /// Limited pay whole life policy.
    LimitedPayWholeLife,
    /// No known family marker was found.
    #[default]
    Unknown,
}

impl PolicyFamily {
    /// Stable identifier, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TermLife => "term_life",
            Self::LimitedPayWholeLife => "limited_pay_whole_life",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PolicyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TermLife => "Term Life",
            Self::LimitedPayWholeLife => "Limited Pay Whole Life",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for PolicyFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "term_life" | "term" => Ok(Self::TermLife),
            "limited_pay_whole_life" | "whole_life" => Ok(Self::LimitedPayWholeLife),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown policy family: {}", other)),
        }
    }
}

/// Values for one row of the illustration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyDataPoint {
    /// Insured's age for this row.
    pub age: u32,

    /// Premium for this row alone, zero when the row is paid up.
    ///
    /// Older payloads predate this field, so it defaults to zero.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub annual_premium: Decimal,

    /// Running total of `annual_premium` through this row.
    #[serde(with = "rust_decimal::serde::float")]
    pub cumulative_premium: Decimal,

    /// Net cash value in whole currency units (always 0 for term).
    pub net_cash_value: i64,

    /// Net death benefit in whole currency units.
    pub net_death_benefit: i64,
}

/// Parsed illustration: one point per table row, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub yearly_data: Vec<YearlyDataPoint>,
}

impl ParseResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no rows were extracted.
    ///
    /// An empty result is how an unrecognized document is reported.
    pub fn is_empty(&self) -> bool {
        self.yearly_data.is_empty()
    }

    /// Number of extracted rows.
    pub fn len(&self) -> usize {
        self.yearly_data.len()
    }

    /// The last row, if any.
    pub fn last(&self) -> Option<&YearlyDataPoint> {
        self.yearly_data.last()
    }

    /// Total premium paid over the whole illustration.
    pub fn total_premium(&self) -> Decimal {
        self.last()
            .map(|p| p.cumulative_premium)
            .unwrap_or(Decimal::ZERO)
    }

    /// Look up the row for a given age.
    pub fn at_age(&self, age: u32) -> Option<&YearlyDataPoint> {
        self.yearly_data.iter().find(|p| p.age == age)
    }
}

/// Parse result together with diagnostics gathered along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IllustrationExtraction {
    /// The yearly series.
    #[serde(flatten)]
    pub result: ParseResult,

    /// Classified policy family.
    pub family: PolicyFamily,

    /// Whether a detail section marker was found (otherwise the whole text
    /// was scanned).
    pub detail_marker_found: bool,

    /// Annual premium stated on the summary page, when present.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub stated_annual_premium: Option<Decimal>,

    /// Rows that matched the table pattern but held malformed numbers.
    pub skipped_rows: usize,

    /// Extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(age: u32, annual: &str, cumulative: &str) -> YearlyDataPoint {
        YearlyDataPoint {
            age,
            annual_premium: annual.parse().unwrap(),
            cumulative_premium: cumulative.parse().unwrap(),
            net_cash_value: 0,
            net_death_benefit: 100_000,
        }
    }

    #[test]
    fn test_serialized_shape() {
        let result = ParseResult {
            yearly_data: vec![point(45, "1234.56", "1234.56")],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "yearly_data": [{
                    "age": 45,
                    "annual_premium": 1234.56,
                    "cumulative_premium": 1234.56,
                    "net_cash_value": 0,
                    "net_death_benefit": 100000
                }]
            })
        );
    }

    #[test]
    fn test_deserialize_payload_without_annual_premium() {
        let json = r#"{"yearly_data":[{"age":45,"cumulative_premium":10.5,"net_cash_value":0,"net_death_benefit":1}]}"#;
        let result: ParseResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.yearly_data[0].annual_premium, Decimal::ZERO);
        assert_eq!(result.yearly_data[0].cumulative_premium, Decimal::new(105, 1));
    }

    #[test]
    fn test_total_premium() {
        let result = ParseResult {
            yearly_data: vec![point(45, "100.00", "100.00"), point(46, "100.00", "200.00")],
        };
        assert_eq!(result.total_premium(), Decimal::new(20000, 2));
        assert_eq!(ParseResult::empty().total_premium(), Decimal::ZERO);
        assert_eq!(result.at_age(46).map(|p| p.age), Some(46));
    }

    #[test]
    fn test_policy_family_round_trip_names() {
        assert_eq!("term_life".parse::<PolicyFamily>(), Ok(PolicyFamily::TermLife));
        assert_eq!(
            "Limited Pay Whole Life".parse::<PolicyFamily>(),
            Ok(PolicyFamily::LimitedPayWholeLife)
        );
        assert!("universal".parse::<PolicyFamily>().is_err());
        assert_eq!(
            serde_json::to_string(&PolicyFamily::LimitedPayWholeLife).unwrap(),
            "\"limited_pay_whole_life\""
        );
    }

    #[test]
    fn test_default_family_is_unknown() {
        assert_eq!(PolicyFamily::default(), PolicyFamily::Unknown);
    }
}
