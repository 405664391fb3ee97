//! Data models for field descriptors and extraction output.

pub mod descriptor;
pub mod fields;

pub use descriptor::{FieldDescriptor, FieldType, LineRelation, MultiLineSpan};
pub use fields::ExtractedFields;
