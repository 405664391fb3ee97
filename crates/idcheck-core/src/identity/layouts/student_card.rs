//! Institution-issued card layout.
//!
//! Student and staff cards print `label: value` on a single line. The
//! card number is institution-scoped, not a national identity number,
//! so it never feeds derivation unless it happens to be 13 digits.

use lazy_static::lazy_static;

use super::field_names as names;
use crate::models::descriptor::{
    FieldDescriptor, FieldType, LineRelation, validate_descriptors,
};

lazy_static! {
    pub(super) static ref DESCRIPTORS: Vec<FieldDescriptor> = {
        let table = vec![
            FieldDescriptor::new(
                names::NAMES,
                &["Name", "Initials"],
                FieldType::TextOnly,
                LineRelation::TitledAdjacent,
            ),
            FieldDescriptor::new(
                names::SURNAME,
                &["Surname"],
                FieldType::TextOnly,
                LineRelation::TitledAdjacent,
            ),
            FieldDescriptor::new(
                names::IDENTITY_NUMBER,
                &["Student Number", "Student No", "Staff Number"],
                FieldType::NumericOnly,
                LineRelation::TitledAdjacent,
            ),
        ];
        validate_descriptors(&table).expect("student card descriptor table is well-formed");
        table
    };
}
