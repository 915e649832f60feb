//! Table row extractors for each supported policy family.

use std::collections::HashMap;

use tracing::trace;

use super::patterns::{TERM_ROW, WHOLE_LIFE_ROW};
use super::{RawRow, RowExtractor};
use crate::models::illustration::PolicyFamily;

/// Term life table: year, age, premium, death benefit, ignored tail.
///
/// Term policies have no cash value, so rows carry none.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermLifeRows;

impl RowExtractor for TermLifeRows {
    fn family(&self) -> PolicyFamily {
        PolicyFamily::TermLife
    }

    fn extract<'t>(&self, detail: &'t str) -> Vec<RawRow<'t>> {
        detail
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let caps = TERM_ROW.captures(line)?;
                trace!("Term row at line {}: {}", idx + 1, line.trim());
                Some(RawRow {
                    line: idx + 1,
                    age: caps.get(1)?.as_str(),
                    premium: caps.get(2)?.as_str(),
                    net_cash_value: None,
                    net_death_benefit: caps.get(3)?.as_str(),
                })
            })
            .collect()
    }
}

/// Limited pay whole life table.
///
/// Column counts differ between illustration revisions, so only the age,
/// the premium (or "Paid Up") and the final two columns are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeLifeRows;

impl RowExtractor for WholeLifeRows {
    fn family(&self) -> PolicyFamily {
        PolicyFamily::LimitedPayWholeLife
    }

    fn extract<'t>(&self, detail: &'t str) -> Vec<RawRow<'t>> {
        detail
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let caps = WHOLE_LIFE_ROW.captures(line)?;
                trace!("Whole life row at line {}: {}", idx + 1, line.trim());
                Some(RawRow {
                    line: idx + 1,
                    age: caps.get(1)?.as_str(),
                    premium: caps.get(2)?.as_str(),
                    net_cash_value: Some(caps.get(3)?.as_str()),
                    net_death_benefit: caps.get(4)?.as_str(),
                })
            })
            .collect()
    }
}

/// Maps each policy family to its row extractor.
pub struct ExtractorRegistry {
    extractors: HashMap<PolicyFamily, Box<dyn RowExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register an extractor under its family, replacing any previous one.
    pub fn register(&mut self, extractor: Box<dyn RowExtractor>) {
        self.extractors.insert(extractor.family(), extractor);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, extractor: impl RowExtractor + 'static) -> Self {
        self.register(Box::new(extractor));
        self
    }

    /// Extractor for a family, if one is registered.
    pub fn get(&self, family: PolicyFamily) -> Option<&dyn RowExtractor> {
        self.extractors.get(&family).map(|e| e.as_ref())
    }

    /// Registered families.
    pub fn families(&self) -> impl Iterator<Item = PolicyFamily> + '_ {
        self.extractors.keys().copied()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::empty().with(TermLifeRows).with(WholeLifeRows)
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.extractors.keys()).finish()
    }
}
