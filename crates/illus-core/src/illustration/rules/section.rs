//! Detail table isolation.
//!
//! Illustrations open with cover and summary pages whose numbers would
//! otherwise be picked up as table rows. The yearly table follows a
//! family-specific heading; everything before its first occurrence is
//! dropped.

use regex::Regex;
use tracing::debug;

use super::patterns::marker_regex;
use crate::error::{IllusError, Result};
use crate::models::config::SectionMarkers;
use crate::models::illustration::PolicyFamily;

/// Detail text together with how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailSection<'t> {
    /// Text after the marker (or the whole document).
    pub text: &'t str,
    /// Index of the configured marker that matched, if any.
    pub marker: Option<usize>,
}

impl DetailSection<'_> {
    pub fn marker_found(&self) -> bool {
        self.marker.is_some()
    }
}

/// Locates the detail section for each policy family.
#[derive(Debug, Clone)]
pub struct SectionLocator {
    term_life: Vec<Regex>,
    limited_pay_whole_life: Vec<Regex>,
}

impl SectionLocator {
    /// Build a locator from configured markers.
    pub fn from_markers(markers: &SectionMarkers) -> Result<Self> {
        Ok(Self {
            term_life: compile(&markers.term_life)?,
            limited_pay_whole_life: compile(&markers.limited_pay_whole_life)?,
        })
    }

    fn markers(&self, family: PolicyFamily) -> &[Regex] {
        match family {
            PolicyFamily::TermLife => &self.term_life,
            PolicyFamily::LimitedPayWholeLife => &self.limited_pay_whole_life,
            PolicyFamily::Unknown => &[],
        }
    }

    /// Return the text after the first configured marker present, or the
    /// whole text when none is.
    pub fn locate<'t>(&self, text: &'t str, family: PolicyFamily) -> DetailSection<'t> {
        for (idx, re) in self.markers(family).iter().enumerate() {
            if let Some(m) = re.find(text) {
                debug!(
                    "Detail section marker {:?} found at byte {}",
                    re.as_str(),
                    m.start()
                );
                return DetailSection {
                    text: &text[m.end()..],
                    marker: Some(idx),
                };
            }
        }

        debug!("No detail section marker for {:?}, scanning full text", family);
        DetailSection { text, marker: None }
    }
}

impl Default for SectionLocator {
    fn default() -> Self {
        Self::from_markers(&SectionMarkers::default())
            .expect("default section markers are valid")
    }
}

fn compile(markers: &[String]) -> Result<Vec<Regex>> {
    markers
        .iter()
        .map(|marker| {
            marker_regex(marker).map_err(|e| {
                IllusError::Config(format!("invalid section marker {:?}: {}", marker, e))
            })
        })
        .collect()
}

/// Locate the detail text with the default markers.
pub fn locate_detail(text: &str, family: PolicyFamily) -> &str {
    SectionLocator::default().locate(text, family).text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_detail_after_marker() {
        let text = "Summary\n1 45 999.99 1\nPOLICY DETAIL\n1 45 100.00 100,000\n";
        assert_eq!(
            locate_detail(text, PolicyFamily::TermLife),
            "\n1 45 100.00 100,000\n"
        );
    }

    #[test]
    fn test_only_first_occurrence_is_split() {
        let text = "a Policy Detail b Policy Detail c";
        assert_eq!(
            locate_detail(text, PolicyFamily::TermLife),
            " b Policy Detail c"
        );
    }

    #[test]
    fn test_whole_life_prefers_assumptions_heading() {
        let locator = SectionLocator::default();
        let text = "Policy Detail\nsummary\nIllustration Assumptions:\nrows";

        let section = locator.locate(text, PolicyFamily::LimitedPayWholeLife);
        assert_eq!(section.text, "\nrows");
        assert_eq!(section.marker, Some(0));

        let section = locator.locate("Policy Detail\nrows", PolicyFamily::LimitedPayWholeLife);
        assert_eq!(section.text, "\nrows");
        assert_eq!(section.marker, Some(1));
    }

    #[test]
    fn test_missing_marker_falls_back_to_full_text() {
        let text = "no headings here\n1 45 100.00 100,000";
        let section = SectionLocator::default().locate(text, PolicyFamily::TermLife);
        assert_eq!(section.text, text);
        assert!(!section.marker_found());
    }

    #[test]
    fn test_unknown_family_is_passthrough() {
        let text = "Policy Detail\nrows";
        assert_eq!(locate_detail(text, PolicyFamily::Unknown), text);
    }
}
