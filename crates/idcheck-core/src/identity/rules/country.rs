//! Canonicalization of OCR'd country names.
//!
//! Older documents print the birth country in Afrikaans. When a value
//! fuzzily matches a known alias the canonical English name is
//! reported instead, so verification never fails on the language of
//! the document.

use tracing::debug;

use crate::identity::similarity::token_set_ratio;

/// Default minimum similarity for an alias translation to apply.
pub const DEFAULT_ALIAS_MIN_RATIO: f64 = 70.0;

/// Afrikaans spellings mapped to canonical English country names.
const ALIASES: &[(&str, &str)] = &[
    ("Suid-Afrika", "South Africa"),
    ("Republiek van Suid-Afrika", "South Africa"),
    ("Namibië", "Namibia"),
    ("Mosambiek", "Mozambique"),
    ("Zimbabwe", "Zimbabwe"),
];

/// Translate a country value to its canonical form.
///
/// Returns the canonical name of the best-scoring alias at or above
/// `min_ratio`, or `None` when nothing clears the bar.
pub fn translate_country(value: &str, min_ratio: f64) -> Option<&'static str> {
    let mut best: Option<(&'static str, f64)> = None;
    for (alias, canonical) in ALIASES {
        let score = token_set_ratio(value, alias);
        if score >= min_ratio && best.is_none_or(|(_, b)| score > b) {
            best = Some((canonical, score));
        }
    }
    if let Some((canonical, score)) = best {
        debug!(
            "translated country {:?} to {:?} at ratio {:.1}",
            value, canonical, score
        );
    }
    best.map(|(canonical, _)| canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translates_exact_alias() {
        assert_eq!(
            translate_country("Suid-Afrika", DEFAULT_ALIAS_MIN_RATIO),
            Some("South Africa")
        );
    }

    #[test]
    fn test_translates_noisy_alias() {
        assert_eq!(
            translate_country("SUID AFRIKA", DEFAULT_ALIAS_MIN_RATIO),
            Some("South Africa")
        );
        assert_eq!(
            translate_country("Suid-Afrlka", DEFAULT_ALIAS_MIN_RATIO),
            Some("South Africa")
        );
    }

    #[test]
    fn test_leaves_unknown_values_alone() {
        assert_eq!(translate_country("Kaapstad", DEFAULT_ALIAS_MIN_RATIO), None);
        assert_eq!(translate_country("", DEFAULT_ALIAS_MIN_RATIO), None);
    }

    #[test]
    fn test_threshold_is_configurable() {
        // At a perfect-match threshold the noisy spelling no longer
        // translates.
        assert_eq!(translate_country("Suid-Afrlka", 100.0), None);
        assert_eq!(
            translate_country("Suid-Afrika", 100.0),
            Some("South Africa")
        );
    }
}
