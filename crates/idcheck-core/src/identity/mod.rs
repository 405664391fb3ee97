//! Identity document field extraction module.

mod extractor;
pub mod layouts;
pub mod matcher;
pub mod normalize;
pub mod rules;
pub mod similarity;

pub use extractor::{
    DEFAULT_MAX_MULTI_LINE, DEFAULT_MIN_RATIO, DocumentParser, ExtractionResult,
};

use crate::error::Result;

/// Trait seam for document field extractors.
pub trait DocumentExtractor {
    /// Extract document fields from plain OCR text.
    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult>;
}
