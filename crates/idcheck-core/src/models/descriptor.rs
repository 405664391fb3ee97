//! Field descriptors: the per-field matching rules a layout declares.

use crate::error::ExtractionError;

/// Character classes retained when a matched value is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Word characters, whitespace and hyphens.
    TextOnly,
    /// Digits only.
    NumericOnly,
    /// Value passes through unchanged.
    Mixed,
    /// Digits and hyphens, for hyphenated dates.
    DateHyphenated,
}

/// Where a field's value sits relative to its matched label line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRelation {
    /// Label on its own line, value on the following line.
    TitledNewline,
    /// Label and value share a line.
    TitledAdjacent,
    /// No separate label: the synonyms match the value line itself.
    UntitledLine,
}

/// Terminator labels bounding a multi-line value span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineSpan {
    /// Labels that mark the end of the span.
    pub terminators: Vec<String>,
}

/// One field's matching rule within a document layout.
///
/// Descriptors are immutable once constructed and owned by their
/// layout's static table. A multi-line descriptor always carries its
/// terminator set; the invalid combination cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Key under which the value is reported.
    pub field_name: &'static str,
    /// Label spellings to fuzzy-match against a line.
    pub label_synonyms: Vec<String>,
    /// Character classes the value keeps.
    pub field_type: FieldType,
    /// Position of the value relative to the label.
    pub relation: LineRelation,
    /// Terminators, when the value may span several lines.
    pub multi_line: Option<MultiLineSpan>,
    /// Upper-case the value instead of title-casing it.
    pub uppercase: bool,
}

impl FieldDescriptor {
    /// Create a single-line descriptor with default casing.
    pub fn new(
        field_name: &'static str,
        label_synonyms: &[&str],
        field_type: FieldType,
        relation: LineRelation,
    ) -> Self {
        Self {
            field_name,
            label_synonyms: label_synonyms.iter().map(|s| s.to_string()).collect(),
            field_type,
            relation,
            multi_line: None,
            uppercase: false,
        }
    }

    /// Allow the value to span several lines, bounded by `terminators`.
    pub fn multi_line(mut self, terminators: &[&str]) -> Self {
        self.multi_line = Some(MultiLineSpan {
            terminators: terminators.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Upper-case the value instead of title-casing it.
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

/// Check a descriptor table's construction invariants.
///
/// Field names must be unique, every descriptor needs at least one
/// label synonym, a multi-line span needs at least one terminator and
/// cannot be combined with a same-line value.
pub fn validate_descriptors(descriptors: &[FieldDescriptor]) -> Result<(), ExtractionError> {
    let mut seen = std::collections::BTreeSet::new();
    for descriptor in descriptors {
        if !seen.insert(descriptor.field_name) {
            return Err(ExtractionError::Descriptor(format!(
                "duplicate field name {:?}",
                descriptor.field_name
            )));
        }
        if descriptor.label_synonyms.iter().all(|s| s.trim().is_empty()) {
            return Err(ExtractionError::Descriptor(format!(
                "field {:?} has no usable label synonyms",
                descriptor.field_name
            )));
        }
        if let Some(span) = &descriptor.multi_line {
            if span.terminators.iter().all(|t| t.trim().is_empty()) {
                return Err(ExtractionError::Descriptor(format!(
                    "multi-line field {:?} has no terminator",
                    descriptor.field_name
                )));
            }
            if descriptor.relation == LineRelation::TitledAdjacent {
                return Err(ExtractionError::Descriptor(format!(
                    "field {:?} cannot be both same-line and multi-line",
                    descriptor.field_name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surname() -> FieldDescriptor {
        FieldDescriptor::new(
            "surname",
            &["Surname"],
            FieldType::TextOnly,
            LineRelation::TitledNewline,
        )
    }

    #[test]
    fn test_builder_defaults() {
        let descriptor = surname();
        assert_eq!(descriptor.multi_line, None);
        assert!(!descriptor.uppercase);
        assert_eq!(descriptor.label_synonyms, vec!["Surname".to_string()]);
    }

    #[test]
    fn test_multi_line_carries_terminators() {
        let descriptor = surname().multi_line(&["Forenames"]);
        let span = descriptor.multi_line.unwrap();
        assert_eq!(span.terminators, vec!["Forenames".to_string()]);
    }

    #[test]
    fn test_validate_accepts_well_formed_table() {
        let names = FieldDescriptor::new(
            "names",
            &["Names", "Forenames"],
            FieldType::TextOnly,
            LineRelation::TitledNewline,
        )
        .multi_line(&["Sex"]);
        assert!(validate_descriptors(&[surname(), names]).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let table = vec![surname(), surname()];
        assert!(validate_descriptors(&table).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_terminators() {
        let mut descriptor = surname();
        descriptor.multi_line = Some(MultiLineSpan { terminators: vec![] });
        assert!(validate_descriptors(&[descriptor]).is_err());
    }

    #[test]
    fn test_validate_rejects_adjacent_multi_line() {
        let mut descriptor = surname().multi_line(&["Forenames"]);
        descriptor.relation = LineRelation::TitledAdjacent;
        assert!(validate_descriptors(&[descriptor]).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_synonyms() {
        let descriptor = FieldDescriptor::new(
            "surname",
            &["  "],
            FieldType::TextOnly,
            LineRelation::TitledNewline,
        );
        assert!(validate_descriptors(&[descriptor]).is_err());
    }
}
