//! Illustration parser: classification, section location, row extraction
//! and premium accumulation in a single pass.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::ParserConfig;
use crate::models::illustration::{IllustrationExtraction, ParseResult, PolicyFamily};

use super::rules::{
    extract_stated_premium, ExtractorRegistry, PolicyClassifier, PremiumAccumulator,
    RowExtractor, SectionLocator,
};
use super::IllustrationParser;

/// Rule-based illustration parser.
///
/// Holds only compiled patterns, so one instance can be shared across
/// threads and used for any number of documents.
#[derive(Debug)]
pub struct IllustrationAssembler {
    classifier: PolicyClassifier,
    locator: SectionLocator,
    registry: ExtractorRegistry,
    extract_summary_premium: bool,
}

impl IllustrationAssembler {
    /// Create a parser with the default markers and extractors.
    pub fn new() -> Self {
        Self {
            classifier: PolicyClassifier::default(),
            locator: SectionLocator::default(),
            registry: ExtractorRegistry::default(),
            extract_summary_premium: true,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            classifier: PolicyClassifier::from_rules(&config.classification_rules)?,
            locator: SectionLocator::from_markers(&config.section_markers)?,
            registry: ExtractorRegistry::default(),
            extract_summary_premium: config.extract_summary_premium,
        })
    }

    /// Register an additional (or replacement) row extractor.
    pub fn with_extractor(mut self, extractor: impl RowExtractor + 'static) -> Self {
        self.registry.register(Box::new(extractor));
        self
    }

    /// Set summary premium extraction.
    pub fn with_summary_premium(mut self, enabled: bool) -> Self {
        self.extract_summary_premium = enabled;
        self
    }

    /// Classify the document without extracting rows.
    pub fn classify(&self, text: &str) -> PolicyFamily {
        self.classifier.classify(text)
    }
}

impl Default for IllustrationAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock timer for `processing_time_ms`.
///
/// `std::time::Instant` panics on wasm32-unknown-unknown, so there the
/// timer reports zero.
struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        #[cfg(not(target_arch = "wasm32"))]
        let ms = self.start.elapsed().as_millis() as u64;
        #[cfg(target_arch = "wasm32")]
        let ms = 0;
        ms
    }
}

impl IllustrationParser for IllustrationAssembler {
    fn parse_detailed(&self, text: &str) -> IllustrationExtraction {
        let timer = Stopwatch::start();
        let mut warnings = Vec::new();

        info!("Parsing illustration from {} characters of text", text.len());

        let family = self.classifier.classify(text);
        let section = self.locator.locate(text, family);

        if family != PolicyFamily::Unknown && !section.marker_found() {
            warnings.push(format!(
                "No detail section heading found for {}, scanned full text",
                family
            ));
        }

        let stated_annual_premium = if self.extract_summary_premium {
            extract_stated_premium(text)
        } else {
            None
        };

        let mut yearly_data = Vec::new();
        let mut skipped_rows = 0;

        match self.registry.get(family) {
            Some(extractor) => {
                let mut accumulator = PremiumAccumulator::new();

                for raw in extractor.extract(section.text) {
                    match raw.normalize().and_then(|values| accumulator.push(values)) {
                        Ok(point) => yearly_data.push(point),
                        Err(e) => {
                            debug!("Skipping row at detail line {}: {}", raw.line, e);
                            skipped_rows += 1;
                        }
                    }
                }

                if yearly_data.is_empty() {
                    warnings.push(format!("No {} table rows found", family));
                }
            }
            None => {
                warn!("Unrecognized illustration format ({:?}), no rows extracted", family);
                warnings.push("Unrecognized illustration format".to_string());
            }
        }

        if skipped_rows > 0 {
            warnings.push(format!("Skipped {} rows with malformed numbers", skipped_rows));
        }

        debug!(
            "Extracted {} {:?} rows ({} skipped)",
            yearly_data.len(),
            family,
            skipped_rows
        );

        IllustrationExtraction {
            result: ParseResult { yearly_data },
            family,
            detail_marker_found: section.marker_found(),
            stated_annual_premium,
            skipped_rows,
            warnings,
            processing_time_ms: timer.elapsed_ms(),
        }
    }
}
