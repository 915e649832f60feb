//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    page_separator: String,
}

/// Extracted text content of a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Full text, pages joined with the page separator.
    pub text: String,
    /// Per-page text.
    pub pages: Vec<PdfPage>,
}

/// Text of a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfContent {
    /// Whether the PDF carries enough text to be worth parsing.
    pub fn has_text(&self, min_len: usize) -> bool {
        self.text.trim().len() >= min_len
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            page_separator: "\n".to_string(),
        }
    }

    /// Set the separator inserted between pages.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Extract text page by page.
    pub fn extract_pages(&self) -> Result<PdfContent> {
        if self.document.is_none() {
            return Err(PdfError::NotLoaded);
        }

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let mut text = String::new();
        let mut pages = Vec::with_capacity(page_texts.len());

        for (idx, page_text) in page_texts.into_iter().enumerate() {
            if idx > 0 {
                text.push_str(&self.page_separator);
            }
            text.push_str(&page_text);
            pages.push(PdfPage {
                number: idx as u32 + 1,
                text: page_text,
            });
        }

        debug!("Extracted {} chars of text from {} pages", text.len(), pages.len());

        Ok(PdfContent { text, pages })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Illustrations are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        self.extract_pages()?
            .pages
            .into_iter()
            .find(|p| p.number == page)
            .map(|p| p.text)
            .ok_or(PdfError::InvalidPage(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::NotLoaded)));
        assert!(matches!(
            extractor.extract_page_text(1),
            Err(PdfError::InvalidPage(1))
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_content_has_text() {
        let content = PdfContent {
            text: "  short  ".to_string(),
            pages: vec![],
        };
        assert!(content.has_text(5));
        assert!(!content.has_text(6));
    }
}
