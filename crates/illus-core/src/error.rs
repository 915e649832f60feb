//! Error types for the illus-core library.

use thiserror::Error;

/// Main error type for the illus library.
#[derive(Error, Debug)]
pub enum IllusError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Row or field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading text out of a PDF.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// An operation needed a document but none was loaded.
    #[error("no document loaded")]
    NotLoaded,
}

/// Errors related to illustration row extraction.
///
/// None of these abort a parse: a row that fails is dropped and the scan
/// continues with the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A matched numeric token could not be normalized.
    #[error("malformed number: {value:?}")]
    MalformedNumber { value: String },
}

impl ExtractionError {
    pub(crate) fn malformed(value: impl Into<String>) -> Self {
        Self::MalformedNumber {
            value: value.into(),
        }
    }
}

/// Result type for the illus library.
pub type Result<T> = std::result::Result<T, IllusError>;
