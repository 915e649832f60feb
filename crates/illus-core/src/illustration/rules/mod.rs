//! Rule-based extractors for illustration documents.

pub mod accumulator;
pub mod classifier;
pub mod numbers;
pub mod patterns;
pub mod rows;
pub mod section;
pub mod summary;

pub use accumulator::PremiumAccumulator;
pub use classifier::{classify_policy, PolicyClassifier};
pub use numbers::{normalize_age, normalize_amount, normalize_whole, round_cents};
pub use rows::{ExtractorRegistry, TermLifeRows, WholeLifeRows};
pub use section::{locate_detail, DetailSection, SectionLocator};
pub use summary::extract_stated_premium;

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::models::illustration::PolicyFamily;

/// Trait for per-family table row extractors.
pub trait RowExtractor: Send + Sync {
    /// The family whose table layout this extractor understands.
    fn family(&self) -> PolicyFamily;

    /// Scan detail text line by line, returning every structurally matching
    /// row in document order. Non-matching lines are skipped.
    fn extract<'t>(&self, detail: &'t str) -> Vec<RawRow<'t>>;
}

/// Column tokens of one matched table row, not yet normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRow<'t> {
    /// Line number within the detail text (1-indexed).
    pub line: usize,
    pub age: &'t str,
    pub premium: &'t str,
    /// Absent for layouts without a cash value column.
    pub net_cash_value: Option<&'t str>,
    pub net_death_benefit: &'t str,
}

impl RawRow<'_> {
    /// Normalize all columns. Any malformed token rejects the whole row.
    pub fn normalize(&self) -> Result<RowValues, ExtractionError> {
        Ok(RowValues {
            age: normalize_age(self.age)?,
            annual_premium: round_cents(normalize_amount(self.premium)?),
            net_cash_value: match self.net_cash_value {
                Some(token) => normalize_whole(token)?,
                None => 0,
            },
            net_death_benefit: normalize_whole(self.net_death_benefit)?,
        })
    }
}

/// Normalized values of one row, before the running premium is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValues {
    pub age: u32,
    pub annual_premium: Decimal,
    pub net_cash_value: i64,
    pub net_death_benefit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term_row() {
        let row = RawRow {
            line: 1,
            age: "45",
            premium: "1,234.56",
            net_cash_value: None,
            net_death_benefit: "100,000",
        };

        assert_eq!(
            row.normalize(),
            Ok(RowValues {
                age: 45,
                annual_premium: Decimal::new(123456, 2),
                net_cash_value: 0,
                net_death_benefit: 100_000,
            })
        );
    }

    #[test]
    fn test_normalize_rejects_bad_token() {
        let row = RawRow {
            line: 7,
            age: "45",
            premium: "1.2.3",
            net_cash_value: Some("10"),
            net_death_benefit: "100",
        };

        assert_eq!(row.normalize(), Err(ExtractionError::malformed("1.2.3")));
    }
}
