//! Policy family classification by marker phrases.

use regex::Regex;
use tracing::debug;

use super::patterns::marker_regex;
use crate::error::{IllusError, Result};
use crate::models::config::ClassificationRule;
use crate::models::illustration::PolicyFamily;

/// Ordered list of marker rules; the first rule whose marker occurs in the
/// text decides the family.
#[derive(Debug, Clone)]
pub struct PolicyClassifier {
    rules: Vec<(Regex, PolicyFamily)>,
}

impl PolicyClassifier {
    /// Build a classifier from configured rules.
    pub fn from_rules(rules: &[ClassificationRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                marker_regex(&rule.marker)
                    .map(|re| (re, rule.family))
                    .map_err(|e| {
                        IllusError::Config(format!(
                            "invalid classification marker {:?}: {}",
                            rule.marker, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Classify the full document text.
    pub fn classify(&self, text: &str) -> PolicyFamily {
        let family = self
            .rules
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, family)| *family)
            .unwrap_or(PolicyFamily::Unknown);

        debug!("Classified document as {:?}", family);
        family
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PolicyClassifier {
    fn default() -> Self {
        let rules = crate::models::config::ParserConfig::default().classification_rules;
        Self::from_rules(&rules).expect("default classification markers are valid")
    }
}

/// Classify text with the default rules.
pub fn classify_policy(text: &str) -> PolicyFamily {
    PolicyClassifier::default().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_term() {
        assert_eq!(
            classify_policy("Protective Life\nACCELERATOR 20 Term Illustration"),
            PolicyFamily::TermLife
        );
    }

    #[test]
    fn test_classify_whole_life() {
        assert_eq!(
            classify_policy("10 Pay - limited pay whole life - Basic Illustration"),
            PolicyFamily::LimitedPayWholeLife
        );
    }

    #[test]
    fn test_term_marker_takes_precedence() {
        let text = "Limited Pay Whole Life conversion option\nAccelerator 20";
        assert_eq!(classify_policy(text), PolicyFamily::TermLife);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify_policy("Universal Life Illustration"), PolicyFamily::Unknown);
        assert_eq!(classify_policy(""), PolicyFamily::Unknown);
    }

    #[test]
    fn test_custom_rule_order() {
        let classifier = PolicyClassifier::from_rules(&[
            ClassificationRule::new("Whole Life", PolicyFamily::LimitedPayWholeLife),
            ClassificationRule::new("Accelerator", PolicyFamily::TermLife),
        ])
        .unwrap();

        assert_eq!(
            classifier.classify("Accelerator 20 or Whole Life"),
            PolicyFamily::LimitedPayWholeLife
        );
        assert_eq!(classifier.len(), 2);
    }
}
