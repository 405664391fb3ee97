//! Normalization of raw matched field values.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::descriptor::{FieldDescriptor, FieldType};

lazy_static! {
    static ref NON_TEXT: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref NON_DATE: Regex = Regex::new(r"[^0-9-]").unwrap();
}

/// Clean a raw matched value according to its descriptor.
///
/// Strips characters outside the field's class, then applies casing:
/// upper-case when the descriptor asks for it, otherwise title case
/// (the default for names and similar free text).
pub fn normalize(raw: &str, descriptor: &FieldDescriptor) -> String {
    let stripped = match descriptor.field_type {
        FieldType::TextOnly => NON_TEXT.replace_all(raw, "").into_owned(),
        FieldType::NumericOnly => NON_DIGIT.replace_all(raw, "").into_owned(),
        FieldType::DateHyphenated => NON_DATE.replace_all(raw, "").into_owned(),
        FieldType::Mixed => raw.to_string(),
    };
    let trimmed = stripped.trim();
    if descriptor.uppercase {
        trimmed.to_uppercase()
    } else {
        title_case(trimmed)
    }
}

/// Lower-case, then capitalize the letter after every non-alphabetic
/// boundary, so `john-michael` becomes `John-Michael`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}
