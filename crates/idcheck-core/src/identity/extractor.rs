//! Document parser: runs a layout's descriptor table over OCR text.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, IdNumberError, Result};
use crate::identity::DocumentExtractor;
use crate::identity::layouts::{DocumentLayout, field_names};
use crate::identity::matcher::{MatchSettings, match_field};
use crate::identity::rules::country::DEFAULT_ALIAS_MIN_RATIO;
use crate::identity::rules::dates::{DEFAULT_MIN_AGE, DateOutcome, standardize};
use crate::identity::rules::id_number::{self, ID_NUMBER_LENGTH};
use crate::models::fields::ExtractedFields;

/// Default minimum label similarity on a 0-100 scale.
pub const DEFAULT_MIN_RATIO: f64 = 70.0;

/// Default cap on the number of lines a multi-line value may span.
pub const DEFAULT_MAX_MULTI_LINE: usize = 2;

/// Result of a document extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted field values, one entry per declared field.
    pub fields: ExtractedFields,
    /// Soft misses and data-quality notes collected along the way.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Field parser for one document layout.
///
/// Stateless across calls: every parse owns its own field map and
/// bookkeeping, so concurrent parses of different documents need no
/// locking.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    layout: DocumentLayout,
    external_id_number: Option<String>,
    ignore_fields: BTreeSet<String>,
    min_ratio: f64,
    max_multi_line: usize,
    country_alias_min_ratio: f64,
    min_age: i32,
}

impl DocumentParser {
    /// Create a parser for `layout` with default tuning.
    pub fn new(layout: DocumentLayout) -> Self {
        Self {
            layout,
            external_id_number: None,
            ignore_fields: BTreeSet::new(),
            min_ratio: DEFAULT_MIN_RATIO,
            max_multi_line: DEFAULT_MAX_MULTI_LINE,
            country_alias_min_ratio: DEFAULT_ALIAS_MIN_RATIO,
            min_age: DEFAULT_MIN_AGE,
        }
    }

    /// Supply an identity number recovered outside the text, e.g. from
    /// a barcode. It takes precedence over any in-text match.
    pub fn with_external_id_number(mut self, id_number: impl Into<String>) -> Self {
        self.external_id_number = Some(id_number.into());
        self
    }

    /// Skip the named fields entirely.
    pub fn with_ignored_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Set the minimum label similarity (0-100).
    pub fn with_min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self
    }

    /// Set the multi-line span cap.
    pub fn with_max_multi_line(mut self, max_multi_line: usize) -> Self {
        self.max_multi_line = max_multi_line;
        self
    }

    /// Set the minimum similarity for country alias translation.
    pub fn with_country_alias_min_ratio(mut self, min_ratio: f64) -> Self {
        self.country_alias_min_ratio = min_ratio;
        self
    }

    /// Set the minimum plausible age used by the date century window.
    pub fn with_min_age(mut self, min_age: i32) -> Self {
        self.min_age = min_age;
        self
    }

    /// Extract every declared field from the OCR text.
    ///
    /// Individual fields that cannot be recovered degrade to absent
    /// values with a warning; only malformed tuning options or a
    /// non-numeric external identity number abort the call.
    pub fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        self.check_options()?;
        let mut warnings = Vec::new();

        info!(
            "extracting {} fields from {} characters of text",
            self.layout.id(),
            text.len()
        );

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let settings = MatchSettings {
            min_ratio: self.min_ratio,
            max_multi_line: self.max_multi_line,
        };

        let mut fields =
            ExtractedFields::with_declared(self.layout.descriptors().iter().map(|d| d.field_name));
        for descriptor in self.layout.descriptors() {
            if self.ignore_fields.contains(descriptor.field_name) {
                debug!("skipping ignored field {}", descriptor.field_name);
                continue;
            }
            if let Some(value) = match_field(&self.layout, descriptor, &lines, &settings) {
                fields.fill(descriptor.field_name, value);
            }
        }

        self.apply_id_number(&mut fields, &mut warnings)?;
        self.standardize_date_of_birth(&mut fields, &mut warnings);
        self.layout
            .post_process(&mut fields, self.country_alias_min_ratio);

        for name in fields.missing() {
            if !self.ignore_fields.contains(name) {
                warnings.push(format!("could not extract {name}"));
            }
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "extracted {} of {} fields in {}ms",
            fields.len() - fields.missing().len(),
            fields.len(),
            processing_time_ms
        );

        Ok(ExtractionResult {
            fields,
            warnings,
            processing_time_ms,
        })
    }

    /// Resolve the identity number and overwrite the fields it encodes.
    ///
    /// An externally supplied number outranks an in-text match, and a
    /// resolved 13-digit number outranks direct text matches for date
    /// of birth, sex and status even when its checksum fails - the
    /// failure is only recorded as a warning.
    fn apply_id_number(
        &self,
        fields: &mut ExtractedFields,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let resolved = match &self.external_id_number {
            Some(external) => {
                let external = external.trim();
                if external.is_empty() || !external.chars().all(|c| c.is_ascii_digit()) {
                    return Err(IdNumberError::NonNumeric(external.to_string()).into());
                }
                if fields.is_found(field_names::IDENTITY_NUMBER) {
                    debug!("external identity number overrides in-text match");
                }
                Some(external.to_string())
            }
            None => fields.get(field_names::IDENTITY_NUMBER).map(str::to_string),
        };
        let Some(id) = resolved else {
            return Ok(());
        };

        fields.overwrite(field_names::IDENTITY_NUMBER, Some(id.clone()));
        if id.len() != ID_NUMBER_LENGTH {
            warn!(
                "identity number {:?} does not have {} digits, skipping derivation",
                id, ID_NUMBER_LENGTH
            );
            warnings.push(format!(
                "identity number {id:?} does not have {ID_NUMBER_LENGTH} digits"
            ));
            return Ok(());
        }

        if !id_number::validate(&id)? {
            warn!("identity number {:?} failed its checksum", id);
            warnings.push(format!("identity number {id:?} failed its checksum"));
        }
        let info = id_number::derive(&id)?;
        fields.overwrite(field_names::DATE_OF_BIRTH, Some(info.date_of_birth));
        fields.overwrite(field_names::SEX, Some(info.sex));
        fields.overwrite(field_names::STATUS, Some(info.status));
        debug!("derived date of birth, sex and status from identity number");
        Ok(())
    }

    fn standardize_date_of_birth(&self, fields: &mut ExtractedFields, warnings: &mut Vec<String>) {
        let Some(raw) = fields.get(field_names::DATE_OF_BIRTH).map(str::to_string) else {
            return;
        };
        match standardize(&raw, self.min_age) {
            DateOutcome::Standardized(date) => {
                fields.overwrite(field_names::DATE_OF_BIRTH, Some(date));
            }
            DateOutcome::Unparsed(original) => {
                warnings.push(format!("date of birth {original:?} left unstandardized"));
            }
        }
    }

    fn check_options(&self) -> std::result::Result<(), ExtractionError> {
        if !(0.0..=100.0).contains(&self.min_ratio) {
            return Err(ExtractionError::InvalidOption {
                option: "min_ratio",
                reason: format!("{} is outside 0-100", self.min_ratio),
            });
        }
        if self.max_multi_line == 0 {
            return Err(ExtractionError::InvalidOption {
                option: "max_multi_line",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&self.country_alias_min_ratio) {
            return Err(ExtractionError::InvalidOption {
                option: "country_alias_min_ratio",
                reason: format!("{} is outside 0-100", self.country_alias_min_ratio),
            });
        }
        Ok(())
    }
}

impl DocumentExtractor for DocumentParser {
    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult> {
        self.parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdcheckError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_declares_every_field_absent() {
        for layout in [
            DocumentLayout::SmartIdCard,
            DocumentLayout::IdBook,
            DocumentLayout::LegacyIdBook,
            DocumentLayout::StudentCard,
        ] {
            let result = DocumentParser::new(layout).parse("").unwrap();
            assert_eq!(result.fields.len(), layout.descriptors().len());
            assert_eq!(
                result.fields.missing().len(),
                layout.descriptors().len(),
                "{} should have no resolved fields",
                layout.id()
            );
        }
    }

    #[test]
    fn test_parse_smart_card() {
        let text = "REPUBLIC OF SOUTH AFRICA\n\
                    Surname\nDoe\n\
                    Names\nJohn Michael\n\
                    Sex\nM\n\
                    Nationality\nRSA\n\
                    Identity Number\n8001015009086\n\
                    Date of Birth\n01 Jan 1980\n\
                    Country of Birth\nSuid-Afrika\n\
                    Status\nCitizen";
        let result = DocumentParser::new(DocumentLayout::SmartIdCard)
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("surname"), Some("Doe"));
        assert_eq!(fields.get("names"), Some("John Michael"));
        assert_eq!(fields.get("sex"), Some("M"));
        assert_eq!(fields.get("nationality"), Some("RSA"));
        assert_eq!(fields.get("identity_number"), Some("8001015009086"));
        assert_eq!(fields.get("date_of_birth"), Some("1980-01-01"));
        assert_eq!(fields.get("country_of_birth"), Some("South Africa"));
        assert_eq!(fields.get("status"), Some("Citizen"));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_parse_id_book() {
        let text = "BOOK OF LIFE\n\
                    I.D. No. 7101135111087\n\
                    Surname\nVan Der Merwe\n\
                    Forenames\nJan\nHendrik\n\
                    Geboortedistrik of-land / District or Country of Birth\n\
                    Suid-Afrika\n\
                    Geboortedatum / Date of Birth\n\
                    71-01-13\n\
                    S.A.CITIZEN";
        let result = DocumentParser::new(DocumentLayout::IdBook)
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("identity_number"), Some("7101135111087"));
        assert_eq!(fields.get("surname"), Some("Van Der Merwe"));
        assert_eq!(fields.get("names"), Some("Jan Hendrik"));
        assert_eq!(fields.get("country_of_birth"), Some("South Africa"));
        // Derived from the identity number, then standardized.
        assert_eq!(fields.get("date_of_birth"), Some("1971-01-13"));
        assert_eq!(fields.get("sex"), Some("M"));
        assert_eq!(fields.get("status"), Some("Citizen"));
    }

    #[test]
    fn test_parse_legacy_book_with_embedded_id() {
        let text = "Identiteitsnommer 6809094800088\n\
                    Van\nBotha\n\
                    Voorname\nMaria\nMagdalena\n\
                    Geboortedistrik of-land\nKaapstad\n\
                    S.A.BURGER";
        let result = DocumentParser::new(DocumentLayout::LegacyIdBook)
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("identity_number"), Some("6809094800088"));
        assert_eq!(fields.get("surname"), Some("Botha"));
        assert_eq!(fields.get("names"), Some("Maria Magdalena"));
        assert_eq!(fields.get("country_of_birth"), Some("Kaapstad"));
        assert_eq!(fields.get("date_of_birth"), Some("1968-09-09"));
        assert_eq!(fields.get("sex"), Some("F"));
        assert_eq!(fields.get("status"), Some("Citizen"));
    }

    #[test]
    fn test_parse_student_card() {
        let text = "UNIVERSITY CARD\n\
                    Name: Jan-Pieter\n\
                    Surname: Smith\n\
                    Student Number: 20504321";
        let result = DocumentParser::new(DocumentLayout::StudentCard)
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("names"), Some("Jan-Pieter"));
        assert_eq!(fields.get("surname"), Some("Smith"));
        assert_eq!(fields.get("identity_number"), Some("20504321"));
        // A card number is not a national identity number: nothing is
        // derived from it.
        assert_eq!(fields.get("sex"), None);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("does not have 13 digits")),
            "{:?}",
            result.warnings
        );
    }

    #[test]
    fn test_multi_line_caps_at_configured_span() {
        let text = "Surname\nDoe\nForenames\nJohn-Michael\nRobert\nIgnore";
        let parser = DocumentParser::new(DocumentLayout::IdBook);
        let result = parser.parse(text).unwrap();
        assert_eq!(result.fields.get("names"), Some("John-Michael Robert"));

        let wider = parser.clone().with_max_multi_line(3).parse(text).unwrap();
        assert_eq!(
            wider.fields.get("names"),
            Some("John-Michael Robert Ignore")
        );
    }

    #[test]
    fn test_external_id_number_overrides_text_match() {
        let text = "id no 123456789\nSurname\nDoe\nForenames\nJane-Michael\nRobert";
        let result = DocumentParser::new(DocumentLayout::IdBook)
            .with_external_id_number("7101134111111")
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("identity_number"), Some("7101134111111"));
        assert_eq!(fields.get("date_of_birth"), Some("1971-01-13"));
        assert_eq!(fields.get("sex"), Some("F"));
        assert_eq!(fields.get("status"), Some("Non Citizen"));
        assert_eq!(fields.get("names"), Some("Jane-Michael Robert"));
    }

    #[test]
    fn test_derivation_outranks_direct_matches() {
        let text = "Surname\nDoe\n\
                    Sex\nF\n\
                    Date of Birth\n01 Jan 1990\n\
                    Status\nNon Citizen";
        let result = DocumentParser::new(DocumentLayout::SmartIdCard)
            .with_external_id_number("8001015009086")
            .parse(text)
            .unwrap();
        let fields = &result.fields;
        assert_eq!(fields.get("date_of_birth"), Some("1980-01-01"));
        assert_eq!(fields.get("sex"), Some("M"));
        assert_eq!(fields.get("status"), Some("Citizen"));
    }

    #[test]
    fn test_checksum_failure_warns_but_still_derives() {
        let result = DocumentParser::new(DocumentLayout::IdBook)
            .with_external_id_number("7101134111111")
            .parse("")
            .unwrap();
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("failed its checksum")),
            "{:?}",
            result.warnings
        );
        assert_eq!(result.fields.get("sex"), Some("F"));
    }

    #[test]
    fn test_non_numeric_external_id_is_an_error() {
        let err = DocumentParser::new(DocumentLayout::IdBook)
            .with_external_id_number("71O113411111I")
            .parse("")
            .unwrap_err();
        assert!(matches!(err, IdcheckError::IdNumber(_)), "{err}");
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let text = "Surname\nDoe\nForenames\nJan";
        let result = DocumentParser::new(DocumentLayout::IdBook)
            .with_ignored_fields(["surname"])
            .parse(text)
            .unwrap();
        assert_eq!(result.fields.get("surname"), None);
        assert_eq!(result.fields.get("names"), Some("Jan"));
        assert!(
            result
                .warnings
                .iter()
                .all(|w| !w.contains("extract surname")),
            "{:?}",
            result.warnings
        );
    }

    #[test]
    fn test_unparsable_date_passes_through_with_warning() {
        let text = "Date of Birth\nSmudged Value";
        let result = DocumentParser::new(DocumentLayout::SmartIdCard)
            .parse(text)
            .unwrap();
        assert_eq!(result.fields.get("date_of_birth"), Some("Smudged Value"));
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("left unstandardized")),
            "{:?}",
            result.warnings
        );
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let parser = DocumentParser::new(DocumentLayout::IdBook).with_min_ratio(140.0);
        assert!(matches!(
            parser.parse("Surname\nDoe"),
            Err(IdcheckError::Extraction(
                ExtractionError::InvalidOption { .. }
            ))
        ));

        let parser = DocumentParser::new(DocumentLayout::IdBook).with_max_multi_line(0);
        assert!(parser.parse("").is_err());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let result = DocumentParser::new(DocumentLayout::SmartIdCard)
            .parse("Surname\nDoe")
            .unwrap();
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("could not extract names")),
            "{:?}",
            result.warnings
        );
    }
}
