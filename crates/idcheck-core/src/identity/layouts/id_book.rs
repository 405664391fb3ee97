//! Barcoded identity book layout.
//!
//! The book prints bilingual labels with the value on the following
//! line, except the identity number, which shares its line with the
//! label. Surname and forenames may each span more than one line.
//! Citizenship appears as a bare phrase with no label at all.

use lazy_static::lazy_static;

use super::field_names as names;
use crate::models::descriptor::{
    FieldDescriptor, FieldType, LineRelation, validate_descriptors,
};

lazy_static! {
    pub(super) static ref DESCRIPTORS: Vec<FieldDescriptor> = {
        let table = vec![
            FieldDescriptor::new(
                names::IDENTITY_NUMBER,
                &["I.D. No.", "ID No", "Identity Number"],
                FieldType::NumericOnly,
                LineRelation::TitledAdjacent,
            ),
            FieldDescriptor::new(
                names::SURNAME,
                &["Surname"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .multi_line(&["Forenames", "Voorname"]),
            FieldDescriptor::new(
                names::NAMES,
                &["Forenames", "Voorname"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .multi_line(&["Geboortedistrik of-land", "District or Country of Birth"]),
            FieldDescriptor::new(
                names::COUNTRY_OF_BIRTH,
                &["District or Country of Birth", "Geboortedistrik of-land"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::DATE_OF_BIRTH,
                &["Date of Birth", "Geboortedatum"],
                FieldType::DateHyphenated,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::STATUS,
                &["S.A. Citizen", "S.A. Burger", "Non Citizen"],
                FieldType::TextOnly,
                LineRelation::UntitledLine,
            ),
        ];
        validate_descriptors(&table).expect("id book descriptor table is well-formed");
        table
    };
}

/// Book quirk: citizenship is a bare phrase, not a label/value pair.
pub(super) fn idiosyncratic_match(
    descriptor: &FieldDescriptor,
    lines: &[&str],
    index: usize,
) -> Option<String> {
    if descriptor.field_name == names::STATUS {
        return Some(super::citizen_toggle(lines[index]));
    }
    None
}
