//! Pre-barcode identity book layout.
//!
//! Labels are Afrikaans-first and the identity number is regularly
//! printed on the same line as its label, so the layout carries an
//! override for it alongside the citizenship toggle.

use lazy_static::lazy_static;

use super::field_names as names;
use crate::identity::rules::id_number::ID_NUMBER_LENGTH;
use crate::models::descriptor::{
    FieldDescriptor, FieldType, LineRelation, validate_descriptors,
};

lazy_static! {
    pub(super) static ref DESCRIPTORS: Vec<FieldDescriptor> = {
        let table = vec![
            FieldDescriptor::new(
                names::IDENTITY_NUMBER,
                &["Identiteitsnommer", "Identity Number"],
                FieldType::NumericOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::SURNAME,
                &["Van", "Surname"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .multi_line(&["Voorname", "Forenames"]),
            FieldDescriptor::new(
                names::NAMES,
                &["Voorname", "Forenames"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .multi_line(&["Geboortedistrik of-land", "District or Country of Birth"]),
            FieldDescriptor::new(
                names::COUNTRY_OF_BIRTH,
                &["Geboortedistrik of-land", "District or Country of Birth"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::DATE_OF_BIRTH,
                &["Geboortedatum", "Date of Birth"],
                FieldType::DateHyphenated,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::STATUS,
                &["S.A.Burger", "S.A. Citizen", "Nie-Burger"],
                FieldType::TextOnly,
                LineRelation::UntitledLine,
            ),
        ];
        validate_descriptors(&table).expect("legacy book descriptor table is well-formed");
        table
    };
}

/// Legacy book quirks: the citizenship toggle, and an identity number
/// embedded in the label line itself.
pub(super) fn idiosyncratic_match(
    descriptor: &FieldDescriptor,
    lines: &[&str],
    index: usize,
) -> Option<String> {
    match descriptor.field_name {
        names::STATUS => Some(super::citizen_toggle(lines[index])),
        names::IDENTITY_NUMBER => {
            let digits: String = lines[index]
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            (digits.len() == ID_NUMBER_LENGTH).then_some(digits)
        }
        _ => None,
    }
}
