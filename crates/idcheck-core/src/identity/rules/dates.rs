//! Date standardization for OCR'd identity documents.
//!
//! Dates arrive in three shapes: `YY-MM-DD` (out of an identity
//! number), `YYYY-MM-DD`, or free text such as `13 Jan 1971`. All are
//! emitted as canonical `YYYY-MM-DD`. Standardization is best-effort:
//! a string that parses as none of the shapes passes through
//! unchanged so that one garbled date never spoils the other fields.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

/// Default minimum plausible age used by the century window.
pub const DEFAULT_MIN_AGE: i32 = 15;

/// Outcome of a standardization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    /// Canonical `YYYY-MM-DD`.
    Standardized(String),
    /// The input did not parse and is preserved unchanged.
    Unparsed(String),
}

impl DateOutcome {
    /// The standardized form, or the original text when parsing failed.
    pub fn into_value(self) -> String {
        match self {
            Self::Standardized(date) | Self::Unparsed(date) => date,
        }
    }

    /// Whether standardization succeeded.
    pub fn is_standardized(&self) -> bool {
        matches!(self, Self::Standardized(_))
    }
}

/// Standardize a date string against the current year.
///
/// A parsed year more recent than `current_year - min_age` is moved
/// back a century: nobody on an identity document is younger than the
/// minimum plausible age, so such years are two-digit ambiguity noise.
pub fn standardize(raw: &str, min_age: i32) -> DateOutcome {
    standardize_relative_to(raw, Utc::now().date_naive().year(), min_age)
}

fn standardize_relative_to(raw: &str, current_year: i32, min_age: i32) -> DateOutcome {
    let compact: String = raw.split_whitespace().collect();
    let parsed = match (compact.matches('-').count(), compact.find('-')) {
        (2, Some(2)) => NaiveDate::parse_from_str(&compact, "%y-%m-%d").ok(),
        (2, Some(4)) => NaiveDate::parse_from_str(&compact, "%Y-%m-%d").ok(),
        (0, _) => NaiveDate::parse_from_str(&compact, "%d%b%Y").ok(),
        _ => None,
    };
    let Some(date) = parsed else {
        debug!("date {:?} left unstandardized", raw);
        return DateOutcome::Unparsed(raw.to_string());
    };

    let date = if date.year() > current_year - min_age {
        date.with_year(date.year() - 100).unwrap_or(date)
    } else {
        date
    };
    DateOutcome::Standardized(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CURRENT_YEAR: i32 = 2026;

    fn standardized(raw: &str) -> DateOutcome {
        standardize_relative_to(raw, CURRENT_YEAR, DEFAULT_MIN_AGE)
    }

    #[test]
    fn test_free_text_date() {
        assert_eq!(
            standardized("13 Jan 1971"),
            DateOutcome::Standardized("1971-01-13".to_string())
        );
    }

    #[test]
    fn test_free_text_date_is_case_insensitive() {
        assert_eq!(
            standardized("09 JUL 1984"),
            DateOutcome::Standardized("1984-07-09".to_string())
        );
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(
            standardized("71-01-13"),
            DateOutcome::Standardized("1971-01-13".to_string())
        );
    }

    #[test]
    fn test_four_digit_year_passes_straight_through() {
        assert_eq!(
            standardized("1971-01-13"),
            DateOutcome::Standardized("1971-01-13".to_string())
        );
    }

    #[test]
    fn test_century_window_moves_implausible_years_back() {
        // A two-digit year inside the minimum-age window cannot be a
        // birth year; 2013 becomes 1913.
        assert_eq!(
            standardized("13-01-13"),
            DateOutcome::Standardized("1913-01-13".to_string())
        );
    }

    #[test]
    fn test_century_window_respects_min_age() {
        // With no minimum age, the same input stays in this century.
        assert_eq!(
            standardize_relative_to("13-01-13", CURRENT_YEAR, -100),
            DateOutcome::Standardized("2013-01-13".to_string())
        );
    }

    #[test]
    fn test_internal_spaces_are_stripped() {
        assert_eq!(
            standardized("71 - 01 - 13"),
            DateOutcome::Standardized("1971-01-13".to_string())
        );
    }

    #[test]
    fn test_unparsable_input_is_preserved() {
        let outcome = standardized("not a date");
        assert_eq!(outcome, DateOutcome::Unparsed("not a date".to_string()));
        assert_eq!(outcome.clone().into_value(), "not a date");
        assert!(!outcome.is_standardized());
    }

    #[test]
    fn test_invalid_calendar_date_is_preserved() {
        assert_eq!(
            standardized("99-02-31"),
            DateOutcome::Unparsed("99-02-31".to_string())
        );
    }
}
