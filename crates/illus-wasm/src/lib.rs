//! WASM bindings for insurance illustration parsing.
//!
//! This crate exposes the text parser and comparison to browsers and Node.js.
//! Text usually comes from a browser-side PDF viewer; PDFs can also be handed
//! over as raw bytes.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use illus_core::illustration::rules;
use illus_core::models::config::ParserConfig;
use illus_core::pdf::{PdfExtractor, PdfProcessor};
use illus_core::{IllustrationAssembler, IllustrationParser, ParseResult, PolicyFamily};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Error payload handed to JavaScript as `{ "error": "..." }`.
#[derive(Serialize)]
struct JsError {
    error: String,
}

fn js_error(message: impl ToString) -> JsValue {
    let payload = JsError {
        error: message.to_string(),
    };
    serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| JsValue::from_str(&payload.error))
}

/// Serialize into plain JS objects; flattened structs would otherwise
/// become `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

fn warn_unrecognized(family: PolicyFamily) {
    if family == PolicyFamily::Unknown {
        web_sys::console::warn_1(&JsValue::from_str("Unrecognized illustration format"));
    }
}

/// Parse illustration text into `{ yearly_data: [...] }`.
///
/// Unrecognized documents give an empty `yearly_data`, never an error.
#[wasm_bindgen]
pub fn parse_illustration_text(text: &str) -> Result<JsValue, JsValue> {
    IllustrationReader::new().parse(text)
}

/// Parse illustration text with family, warnings and stated premium.
#[wasm_bindgen]
pub fn parse_illustration_detailed(text: &str) -> Result<JsValue, JsValue> {
    IllustrationReader::new().parse_detailed(text)
}

/// Classify illustration text (`"term_life"`, `"limited_pay_whole_life"`
/// or `"unknown"`).
#[wasm_bindgen]
pub fn classify_policy(text: &str) -> String {
    rules::classify_policy(text).as_str().to_string()
}

/// Parse an amount token as printed in illustrations (e.g. "12,345.67",
/// "Paid Up").
#[wasm_bindgen]
pub fn normalize_amount(token: &str) -> Option<f64> {
    rules::normalize_amount(token).ok().and_then(|d| d.to_f64())
}

/// Align two parsed results (as returned by `parse_illustration_text`) by
/// age.
#[wasm_bindgen]
pub fn compare_illustrations(left: JsValue, right: JsValue) -> Result<JsValue, JsValue> {
    let left: ParseResult = serde_wasm_bindgen::from_value(left).map_err(js_error)?;
    let right: ParseResult = serde_wasm_bindgen::from_value(right).map_err(js_error)?;

    to_js(&illus_core::compare(&left, &right))
}

/// Extract text from PDF bytes and parse it.
#[wasm_bindgen]
pub fn parse_pdf_bytes(data: &js_sys::Uint8Array) -> Result<JsValue, JsValue> {
    let text = pdf_text(&data.to_vec())?;
    parse_illustration_text(&text)
}

/// Read a browser `File` holding a PDF or plain text and parse it.
#[wasm_bindgen]
pub async fn parse_file(file: web_sys::File) -> Result<JsValue, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let text = if bytes.starts_with(b"%PDF") {
        pdf_text(&bytes)?
    } else {
        String::from_utf8(bytes).map_err(js_error)?
    };

    parse_illustration_text(&text)
}

fn pdf_text(data: &[u8]) -> Result<String, JsValue> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data).map_err(js_error)?;
    let content = extractor.extract_pages().map_err(js_error)?;
    Ok(content.text)
}

/// Illustration reader class for browser use.
#[wasm_bindgen]
pub struct IllustrationReader {
    parser: IllustrationAssembler,
}

#[wasm_bindgen]
impl IllustrationReader {
    /// Create a reader with the default classification rules and markers.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: IllustrationAssembler::new(),
        }
    }

    /// Replace the parser configuration from a JSON string shaped like the
    /// `parser` section of the CLI configuration file.
    #[wasm_bindgen]
    pub fn set_config(&mut self, json: &str) -> Result<(), JsValue> {
        let config: ParserConfig = serde_json::from_str(json).map_err(js_error)?;
        self.parser = IllustrationAssembler::from_config(&config).map_err(js_error)?;
        Ok(())
    }

    /// Parse illustration text into `{ yearly_data: [...] }`.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        let extraction = self.parser.parse_detailed(text);
        warn_unrecognized(extraction.family);
        to_js(&extraction.result)
    }

    /// Parse with family, warnings and stated premium.
    #[wasm_bindgen]
    pub fn parse_detailed(&self, text: &str) -> Result<JsValue, JsValue> {
        let extraction = self.parser.parse_detailed(text);
        warn_unrecognized(extraction.family);
        to_js(&extraction)
    }
}

impl Default for IllustrationReader {
    fn default() -> Self {
        Self::new()
    }
}
