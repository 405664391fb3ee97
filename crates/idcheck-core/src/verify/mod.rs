//! Field verification: score extracted fields against a claim.
//!
//! Verification is independent of extraction: it compares two field
//! dictionaries and renders a verdict. Fields present on only one side
//! carry no evidence either way; they are excluded from the aggregate
//! and reported as non-comparable in verbose output.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, VerificationError};
use crate::identity::similarity::ratio;
use crate::models::fields::ExtractedFields;

/// Default aggregate percentage required for a pass verdict.
pub const DEFAULT_THRESHOLD: f64 = 75.0;

/// Default number of comparable fields required to trust the aggregate.
pub const DEFAULT_MIN_MATCHES: usize = 4;

/// Tunables for a verification call.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Aggregate percentage at or above which the claim is verified.
    pub threshold: f64,
    /// Minimum comparable fields; below it the aggregate is forced to 0.
    pub min_matches: usize,
    /// Include the per-field breakdown in the report.
    pub verbose: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_matches: DEFAULT_MIN_MATCHES,
            verbose: false,
        }
    }
}

impl VerifyOptions {
    /// Set the pass threshold (0-100).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the minimum number of comparable fields.
    pub fn with_min_matches(mut self, min_matches: usize) -> Self {
        self.min_matches = min_matches;
        self
    }

    /// Ask for the per-field breakdown.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

/// Per-field comparison between a claimed and an extracted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    /// Similarity on a 0-100 scale; `None` when no comparable pair
    /// existed.
    pub match_percentage: Option<f64>,
    /// The claimed value, when the field was claimed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed: Option<String>,
    /// The extracted value, when the field resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted: Option<String>,
}

/// Outcome of a verification call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    /// Whether the aggregate cleared the threshold.
    pub is_verified: bool,
    /// Aggregate match percentage.
    pub total: f64,
    /// Per-field detail, populated in verbose mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldComparison>>,
}

/// Score `extracted` against `claimed` and render a verdict.
///
/// Every claimed field with a non-empty extracted counterpart is
/// scored with an edit-distance ratio; the aggregate is the mean of
/// those scores. Fewer comparable fields than `min_matches` is too
/// little evidence to trust a partial match, so the aggregate is
/// forced to zero.
pub fn verify(
    extracted: &ExtractedFields,
    claimed: &BTreeMap<String, String>,
    options: &VerifyOptions,
) -> Result<VerificationReport> {
    check_options(options)?;

    let mut comparisons = BTreeMap::new();
    let mut scores = Vec::new();

    for (name, claim) in claimed {
        match extracted.get(name) {
            Some(value) => {
                let percentage = round2(ratio(
                    &claim.trim().to_lowercase(),
                    &value.trim().to_lowercase(),
                ));
                scores.push(percentage);
                comparisons.insert(
                    name.clone(),
                    FieldComparison {
                        match_percentage: Some(percentage),
                        claimed: Some(claim.clone()),
                        extracted: Some(value.to_string()),
                    },
                );
            }
            None => {
                debug!("claimed field {:?} has no extracted counterpart", name);
                comparisons.insert(
                    name.clone(),
                    FieldComparison {
                        match_percentage: None,
                        claimed: Some(claim.clone()),
                        extracted: None,
                    },
                );
            }
        }
    }

    // Extracted fields nobody claimed are non-comparable too.
    for (name, value) in extracted.iter() {
        if claimed.contains_key(name) {
            continue;
        }
        let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        comparisons.insert(
            name.clone(),
            FieldComparison {
                match_percentage: None,
                claimed: None,
                extracted: Some(value.to_string()),
            },
        );
    }

    let total = if scores.len() < options.min_matches {
        warn!(
            "only {} comparable fields, fewer than the {} required; refusing a partial match",
            scores.len(),
            options.min_matches
        );
        0.0
    } else {
        round2(scores.iter().sum::<f64>() / scores.len() as f64)
    };
    let is_verified = total >= options.threshold;
    debug!("verification total {:.2}, verified: {}", total, is_verified);

    Ok(VerificationReport {
        is_verified,
        total,
        fields: options.verbose.then_some(comparisons),
    })
}

fn check_options(options: &VerifyOptions) -> std::result::Result<(), VerificationError> {
    if !(0.0..=100.0).contains(&options.threshold) {
        return Err(VerificationError::InvalidOption {
            option: "threshold",
            reason: format!("{} is outside 0-100", options.threshold),
        });
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
