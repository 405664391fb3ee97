//! Context-driven fuzzy matching of field labels against OCR lines.
//!
//! The engine scans the whole document once per descriptor, keeping the
//! best-scoring label match seen so far. All label comparisons use the
//! token-set ratio because OCR splits, repeats and reorders label words.

use std::cmp::Ordering;

use tracing::trace;

use crate::identity::layouts::DocumentLayout;
use crate::identity::normalize::normalize;
use crate::identity::similarity::token_set_ratio;
use crate::models::descriptor::{FieldDescriptor, LineRelation};

/// Tunables for the line-match engine.
#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    /// Minimum acceptable label similarity on a 0-100 scale.
    pub min_ratio: f64,
    /// Maximum number of lines a multi-line value may span.
    pub max_multi_line: usize,
}

/// Best-effort extraction of one field from the document lines.
///
/// Returns the retained value, or `None` when no label match produced a
/// recoverable, non-empty value.
pub fn match_field(
    layout: &DocumentLayout,
    descriptor: &FieldDescriptor,
    lines: &[&str],
    settings: &MatchSettings,
) -> Option<String> {
    let mut best_ratio = settings.min_ratio;
    let mut matched_once = false;
    let mut skip_to = 0usize;
    let mut retained: Option<String> = None;

    for (index, line) in lines.iter().enumerate() {
        if index < skip_to {
            continue;
        }
        let ratio = label_ratio(line, &descriptor.label_synonyms);
        // The first match only has to meet the caller minimum;
        // replacing a retained value requires strict improvement, so
        // duplicate label text later in the document cannot re-trigger
        // a field it already filled.
        let accepted = if matched_once {
            ratio > best_ratio
        } else {
            ratio >= best_ratio
        };
        if !accepted {
            continue;
        }

        let (candidate, resume_at) = extract_candidate(layout, descriptor, lines, index, settings);
        let value = candidate
            .map(|raw| normalize(&raw, descriptor))
            .filter(|v| !v.is_empty());
        let Some(value) = value else {
            trace!(
                "label match for {} at line {} had no recoverable value",
                descriptor.field_name, index
            );
            continue;
        };
        best_ratio = ratio;
        matched_once = true;
        skip_to = resume_at;
        retained = Some(value);
    }
    retained
}

fn label_ratio(line: &str, synonyms: &[String]) -> f64 {
    synonyms
        .iter()
        .map(|synonym| token_set_ratio(line, synonym))
        .fold(0.0, f64::max)
}

/// Pull the raw candidate value for a label matched at `index`.
///
/// Also returns the line index scanning resumes from, so that lines
/// consumed by a multi-line capture are never rescanned.
fn extract_candidate(
    layout: &DocumentLayout,
    descriptor: &FieldDescriptor,
    lines: &[&str],
    index: usize,
    settings: &MatchSettings,
) -> (Option<String>, usize) {
    // Layout quirks outrank the generic line relationship.
    if let Some(value) = layout.idiosyncratic_match(descriptor, lines, index) {
        return (Some(value), index + 1);
    }

    match descriptor.relation {
        LineRelation::TitledAdjacent => (
            Some(strip_label(lines[index], &descriptor.label_synonyms)),
            index + 1,
        ),
        LineRelation::UntitledLine => (Some(lines[index].to_string()), index + 1),
        LineRelation::TitledNewline => {
            let Some(first) = lines.get(index + 1) else {
                return (None, index + 1);
            };
            let mut parts = vec![first.trim().to_string()];
            let mut resume = index + 2;
            if let Some(span) = &descriptor.multi_line {
                for (offset, line) in lines.iter().enumerate().skip(index + 2) {
                    if parts.len() >= settings.max_multi_line {
                        break;
                    }
                    if is_terminator(line, &span.terminators, settings.min_ratio) {
                        resume = offset;
                        break;
                    }
                    parts.push(line.trim().to_string());
                    resume = offset + 1;
                }
            }
            (Some(parts.join(" ").trim().to_string()), resume)
        }
    }
}

fn is_terminator(line: &str, terminators: &[String], min_ratio: f64) -> bool {
    terminators
        .iter()
        .any(|t| token_set_ratio(line, t) >= min_ratio)
}

/// Remove the matched label text from a same-line value.
fn strip_label(line: &str, synonyms: &[String]) -> String {
    let lower = line.to_lowercase();
    let mut by_length: Vec<&String> = synonyms.iter().collect();
    by_length.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for synonym in by_length {
        let needle = synonym.to_lowercase();
        if let Some(pos) = lower.find(&needle) {
            // Byte offsets only transfer when lowering kept the length.
            let rest = if lower.len() == line.len() {
                &line[pos + needle.len()..]
            } else {
                &lower[pos + needle.len()..]
            };
            return rest
                .trim_start_matches([':', ';', '.', '-', ' '])
                .trim()
                .to_string();
        }
    }
    // OCR mangled the label text: drop as many leading words as the
    // closest synonym has.
    let closest = synonyms.iter().max_by(|a, b| {
        token_set_ratio(line, a)
            .partial_cmp(&token_set_ratio(line, b))
            .unwrap_or(Ordering::Equal)
    });
    let skip = closest.map_or(0, |s| s.split_whitespace().count());
    line.split_whitespace()
        .skip(skip)
        .collect::<Vec<_>>()
        .join(" ")
}
