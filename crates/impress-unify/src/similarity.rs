//! String similarity scorers on `[0, 1]`
//!
//! `fuzzy_ratio` and `token_set_ratio` follow the classic fuzzy-matching
//! conventions: both inputs are reduced to lowercase alphanumeric tokens
//! joined by single spaces, and the score is reported in whole percentage
//! points.

use std::collections::BTreeSet;

/// Jaro-Winkler similarity (prefix boost up to 4 chars, scale 0.1)
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// Indel-based similarity ratio: `2 * LCS / (len(a) + len(b))`
pub fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    raw_ratio(&full_process(a), &full_process(b))
}

/// Token-set similarity, insensitive to word order and to words present
/// in only one of the strings when the rest is a subset of the other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a = full_process(a);
    let b = full_process(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let sorted_sect = join_tokens(tokens_a.intersection(&tokens_b).copied());
    let sorted_a_only = join_tokens(tokens_a.difference(&tokens_b).copied());
    let sorted_b_only = join_tokens(tokens_b.difference(&tokens_a).copied());

    let combined_a = format!("{sorted_sect} {sorted_a_only}");
    let combined_b = format!("{sorted_sect} {sorted_b_only}");
    let combined_a = combined_a.trim();
    let combined_b = combined_b.trim();

    [
        raw_ratio(&sorted_sect, combined_a),
        raw_ratio(&sorted_sect, combined_b),
        raw_ratio(combined_a, combined_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Ratio on already processed strings, rounded to whole percent
fn raw_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    let ratio = 2.0 * lcs_length(&a, &b) as f64 / total as f64;
    (ratio * 100.0).round() / 100.0
}

/// Replace non-alphanumerics with spaces, lowercase, and collapse
/// whitespace runs to single spaces
fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    join_tokens(replaced.to_lowercase().split_whitespace())
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

/// LCS length using two-row DP
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &char_a in a {
        for (j, &char_b) in b.iter().enumerate() {
            curr[j + 1] = if char_a == char_b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
