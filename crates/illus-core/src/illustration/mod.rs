//! Illustration parsing.

mod compare;
mod parser;
pub mod rules;

pub use compare::{compare, AgeValues, Comparison, ComparisonRow};
pub use parser::IllustrationAssembler;
pub use rules::{RawRow, RowExtractor, RowValues};

use crate::models::illustration::{IllustrationExtraction, ParseResult};

/// Trait for illustration parsers.
///
/// Parsing never fails: a document that cannot be read as an illustration
/// yields an empty `yearly_data` sequence.
pub trait IllustrationParser {
    /// Parse the yearly series from document text.
    fn parse(&self, text: &str) -> ParseResult {
        self.parse_detailed(text).result
    }

    /// Parse with diagnostics.
    fn parse_detailed(&self, text: &str) -> IllustrationExtraction;
}
