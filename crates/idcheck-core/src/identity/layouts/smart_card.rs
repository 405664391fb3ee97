//! Smart identity card layout.
//!
//! Card text reads top to bottom with every printed label on its own
//! line and the value beneath it. Names may wrap onto a second line,
//! bounded by the next printed label.

use lazy_static::lazy_static;

use super::field_names as names;
use crate::models::descriptor::{
    FieldDescriptor, FieldType, LineRelation, validate_descriptors,
};

lazy_static! {
    pub(super) static ref DESCRIPTORS: Vec<FieldDescriptor> = {
        let table = vec![
            FieldDescriptor::new(
                names::SURNAME,
                &["Surname"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::NAMES,
                &["Names"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .multi_line(&["Sex", "Nationality"]),
            FieldDescriptor::new(
                names::SEX,
                &["Sex"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .uppercase(),
            FieldDescriptor::new(
                names::NATIONALITY,
                &["Nationality"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            )
            .uppercase(),
            FieldDescriptor::new(
                names::IDENTITY_NUMBER,
                &["Identity Number", "ID Number"],
                FieldType::NumericOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::DATE_OF_BIRTH,
                &["Date of Birth"],
                FieldType::Mixed,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::COUNTRY_OF_BIRTH,
                &["Country of Birth"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            ),
            FieldDescriptor::new(
                names::STATUS,
                &["Status"],
                FieldType::TextOnly,
                LineRelation::TitledNewline,
            ),
        ];
        validate_descriptors(&table).expect("smart card descriptor table is well-formed");
        table
    };
}
