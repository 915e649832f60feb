//! Core library for insurance illustration parsing.
//!
//! This crate provides:
//! - PDF text reading (the text blob the parser consumes)
//! - Policy family classification (term life, limited pay whole life)
//! - Detail-table isolation and per-family row extraction
//! - Yearly value models with running cumulative premium
//! - Age-aligned comparison of two illustrations

pub mod error;
pub mod models;
pub mod pdf;
pub mod illustration;

pub use error::{IllusError, Result};
pub use models::illustration::{
    IllustrationExtraction, ParseResult, PolicyFamily, YearlyDataPoint,
};
pub use models::config::IllusConfig;
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use illustration::{
    compare, Comparison, IllustrationAssembler, IllustrationParser, RowExtractor,
};
