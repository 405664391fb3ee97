//! Fuzzy string similarity scoring for OCR label matching.

use strsim::normalized_levenshtein;

/// Edit-distance similarity between two strings on a 0-100 scale.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Token-set similarity between two strings on a 0-100 scale.
///
/// Both strings are reduced to sorted, deduplicated lowercase token
/// sets and scored as the best pairing of the shared tokens against
/// either side's remainder. The score is insensitive to word order and
/// duplication, and tolerant of extra or missing words - OCR routinely
/// splits, repeats or reorders label text.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let common: Vec<&str> = tokens_a
        .iter()
        .filter(|t| tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_a: Vec<&str> = tokens_a
        .iter()
        .filter(|t| !tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_b: Vec<&str> = tokens_b
        .iter()
        .filter(|t| !tokens_a.contains(*t))
        .map(String::as_str)
        .collect();

    let base = common.join(" ");
    let with_a = join_parts(&base, &only_a);
    let with_b = join_parts(&base, &only_b);

    ratio(&base, &with_a)
        .max(ratio(&base, &with_b))
        .max(ratio(&with_a, &with_b))
}

fn tokens(s: &str) -> Vec<String> {
    let mut tokens: Vec<String> = s
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

fn join_parts(base: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return rest.join(" ");
    }
    format!("{} {}", base, rest.join(" "))
}
