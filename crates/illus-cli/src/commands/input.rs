//! Reading illustration documents into text.

use std::fs;
use std::path::Path;

use tracing::debug;

use illus_core::pdf::{PdfExtractor, PdfProcessor};
use illus_core::IllusConfig;

/// File extensions accepted as input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "text"];

/// Whether a path has a supported extension.
pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension(path).as_str())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read a PDF or plain-text illustration into text with line breaks intact.
pub fn read_document(path: &Path, config: &IllusConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let text = match extension(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor =
                PdfExtractor::new().with_page_separator(config.pdf.page_separator.clone());
            extractor.load(&data)?;
            debug!("PDF {} has {} pages", path.display(), extractor.page_count());

            let content = extractor.extract_pages()?;
            if !content.has_text(config.pdf.min_text_length) {
                anyhow::bail!(
                    "No extractable text in {} (scanned illustrations are not supported)",
                    path.display()
                );
            }
            content.text
        }
        "txt" | "text" => fs::read_to_string(path)?,
        other => anyhow::bail!("Unsupported file format: {}", other),
    };

    debug!("Read {} characters from {}", text.len(), path.display());
    Ok(text)
}
