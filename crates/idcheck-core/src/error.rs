//! Error types for the idcheck-core library.

use thiserror::Error;

/// Main error type for the idcheck library.
#[derive(Error, Debug)]
pub enum IdcheckError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Identity number format error.
    #[error("identity number error: {0}")]
    IdNumber(#[from] IdNumberError),

    /// Field verification error.
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),
}

/// Errors related to document field extraction.
///
/// Only malformed configuration aborts a call. A field that cannot be
/// found, a date that does not parse or an unknown layout id are soft
/// misses and never surface here.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A tuning option was out of range.
    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    /// A descriptor table violates its construction invariants.
    #[error("malformed descriptor table: {0}")]
    Descriptor(String),
}

/// Errors related to identity number handling.
#[derive(Error, Debug)]
pub enum IdNumberError {
    /// The identity number contains non-digit characters.
    #[error("identity number is not numeric: {0:?}")]
    NonNumeric(String),

    /// The identity number has the wrong number of digits for
    /// derivation.
    #[error("identity number must have {expected} digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Errors related to field verification.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// A tuning option was out of range.
    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: &'static str, reason: String },
}

/// Result type for the idcheck library.
pub type Result<T> = std::result::Result<T, IdcheckError>;
