//! Document layout registry.
//!
//! Each supported document type declares an ordered field descriptor
//! table plus two narrow hooks: an idiosyncratic per-line match that
//! outranks the generic line relationship, and a post-processing pass.
//! The shared matching algorithm lives in `identity::matcher` and
//! operates over this closed variant set.

mod id_book;
mod legacy_book;
mod smart_card;
mod student_card;

use tracing::debug;

use crate::identity::rules::country::translate_country;
use crate::identity::similarity::token_set_ratio;
use crate::models::descriptor::FieldDescriptor;
use crate::models::fields::ExtractedFields;

/// Canonical field names shared across layouts.
pub mod field_names {
    pub const IDENTITY_NUMBER: &str = "identity_number";
    pub const SURNAME: &str = "surname";
    pub const NAMES: &str = "names";
    pub const SEX: &str = "sex";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const COUNTRY_OF_BIRTH: &str = "country_of_birth";
    pub const STATUS: &str = "status";
    pub const NATIONALITY: &str = "nationality";
}

/// A supported document type and its extraction rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// Polycarbonate smart identity card.
    SmartIdCard,
    /// Barcoded identity book.
    IdBook,
    /// Pre-barcode identity book with Afrikaans-first labels.
    LegacyIdBook,
    /// Institution-issued card printing `label: value` lines.
    StudentCard,
}

impl DocumentLayout {
    /// Resolve a layout from its identifier.
    ///
    /// An unrecognized id is a soft miss, not an error: callers see
    /// `None` and decide how to degrade.
    pub fn resolve(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "smart_id_card" | "smart_id" => Some(Self::SmartIdCard),
            "id_book" => Some(Self::IdBook),
            "legacy_id_book" | "id_book_old" => Some(Self::LegacyIdBook),
            "student_card" => Some(Self::StudentCard),
            other => {
                debug!("unrecognized document layout {:?}", other);
                None
            }
        }
    }

    /// The layout's canonical identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SmartIdCard => "smart_id_card",
            Self::IdBook => "id_book",
            Self::LegacyIdBook => "legacy_id_book",
            Self::StudentCard => "student_card",
        }
    }

    /// The ordered field descriptor table for this layout.
    pub fn descriptors(&self) -> &'static [FieldDescriptor] {
        match self {
            Self::SmartIdCard => smart_card::DESCRIPTORS.as_slice(),
            Self::IdBook => id_book::DESCRIPTORS.as_slice(),
            Self::LegacyIdBook => legacy_book::DESCRIPTORS.as_slice(),
            Self::StudentCard => student_card::DESCRIPTORS.as_slice(),
        }
    }

    /// Layout-specific override: recover a value straight from the
    /// matched line, bypassing the generic line relationship.
    pub(crate) fn idiosyncratic_match(
        &self,
        descriptor: &FieldDescriptor,
        lines: &[&str],
        index: usize,
    ) -> Option<String> {
        match self {
            Self::IdBook => id_book::idiosyncratic_match(descriptor, lines, index),
            Self::LegacyIdBook => legacy_book::idiosyncratic_match(descriptor, lines, index),
            Self::SmartIdCard | Self::StudentCard => None,
        }
    }

    /// Layout-specific cleanup after derivation and standardization.
    pub(crate) fn post_process(&self, fields: &mut ExtractedFields, country_alias_min_ratio: f64) {
        match self {
            Self::SmartIdCard | Self::IdBook | Self::LegacyIdBook => {
                let translated = fields
                    .get(field_names::COUNTRY_OF_BIRTH)
                    .and_then(|country| translate_country(country, country_alias_min_ratio))
                    .map(str::to_string);
                if let Some(country) = translated {
                    fields.overwrite(field_names::COUNTRY_OF_BIRTH, Some(country));
                }
            }
            Self::StudentCard => {}
        }
    }
}

const CITIZEN_PHRASES: &[&str] = &["S.A. Citizen", "S.A. Burger"];
const NON_CITIZEN_PHRASES: &[&str] = &["Non Citizen", "Nie-Burger"];

/// Resolve the citizen / non-citizen toggle printed as a bare phrase.
///
/// The line is scored against both candidate phrase sets and the higher
/// side wins; literal label/value separation does not apply here.
pub(super) fn citizen_toggle(line: &str) -> String {
    let best = |phrases: &[&str]| {
        phrases
            .iter()
            .map(|p| token_set_ratio(line, p))
            .fold(0.0, f64::max)
    };
    if best(CITIZEN_PHRASES) >= best(NON_CITIZEN_PHRASES) {
        "Citizen".to_string()
    } else {
        "Non Citizen".to_string()
    }
}
