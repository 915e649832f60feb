//! Configuration structures for the illustration pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IllusError, Result};
use super::illustration::PolicyFamily;

/// Main configuration for the illus pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IllusConfig {
    /// Illustration parser configuration.
    pub parser: ParserConfig,

    /// PDF reading configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// One classification rule: a marker phrase and the family it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Literal phrase, matched case-insensitively.
    pub marker: String,
    /// Family assigned when the marker is present.
    pub family: PolicyFamily,
}

impl ClassificationRule {
    pub fn new(marker: impl Into<String>, family: PolicyFamily) -> Self {
        Self {
            marker: marker.into(),
            family,
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Classification rules, evaluated in order; the first match wins.
    pub classification_rules: Vec<ClassificationRule>,

    /// Detail section markers per family.
    pub section_markers: SectionMarkers,

    /// Look for the stated annual premium on the summary page.
    pub extract_summary_premium: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            // Term marker first: documents mentioning both are term.
            classification_rules: vec![
                ClassificationRule::new("Accelerator 20", PolicyFamily::TermLife),
                ClassificationRule::new(
                    "Limited Pay Whole Life",
                    PolicyFamily::LimitedPayWholeLife,
                ),
            ],
            section_markers: SectionMarkers::default(),
            extract_summary_premium: true,
        }
    }
}

/// Phrases after which the yearly detail table starts.
///
/// Markers are tried in order and the first one present wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMarkers {
    pub term_life: Vec<String>,
    pub limited_pay_whole_life: Vec<String>,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            term_life: vec!["Policy Detail".to_string()],
            limited_pay_whole_life: vec![
                "Illustration Assumptions:".to_string(),
                "Policy Detail".to_string(),
            ],
        }
    }
}

/// PDF reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,

    /// Separator inserted between pages.
    pub page_separator: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            page_separator: "\n".to_string(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl IllusConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| IllusError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IllusError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rule_order() {
        let config = ParserConfig::default();
        let families: Vec<_> = config
            .classification_rules
            .iter()
            .map(|r| r.family)
            .collect();
        assert_eq!(
            families,
            vec![PolicyFamily::TermLife, PolicyFamily::LimitedPayWholeLife]
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = IllusConfig::from_json(r#"{"output": {"pretty_json": true}}"#).unwrap();
        assert!(config.output.pretty_json);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.parser.classification_rules.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = IllusConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, IllusError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IllusConfig::default();
        config.parser.section_markers.term_life = vec!["Annual Values".to_string()];
        config.save(&path).unwrap();

        let loaded = IllusConfig::from_file(&path).unwrap();
        assert_eq!(loaded.parser.section_markers.term_life, vec!["Annual Values"]);
    }
}
