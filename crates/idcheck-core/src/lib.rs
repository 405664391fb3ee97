//! Core library for identity document OCR processing.
//!
//! This crate provides:
//! - Fuzzy, layout-driven field extraction from OCR'd document text
//! - Identity number checksum validation and redundant-field derivation
//! - Date standardization across the formats documents actually print
//! - Verification of extracted fields against claimed values
//!
//! Image handling, the OCR engine and any transport layer live outside
//! this crate: it consumes a recognized text blob and produces field
//! dictionaries and verdicts.

pub mod error;
pub mod identity;
pub mod models;
pub mod verify;

pub use error::{IdcheckError, Result};
pub use identity::layouts::{DocumentLayout, field_names};
pub use identity::rules::dates::DateOutcome;
pub use identity::rules::id_number::{IdNumberInfo, format_id_number, validate};
pub use identity::{DocumentExtractor, DocumentParser, ExtractionResult};
pub use models::descriptor::{FieldDescriptor, FieldType, LineRelation, MultiLineSpan};
pub use models::fields::ExtractedFields;
pub use verify::{FieldComparison, VerificationReport, VerifyOptions, verify};
