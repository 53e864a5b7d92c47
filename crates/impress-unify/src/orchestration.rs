//! Value unification orchestration
//!
//! Normalizes raw values into keys, clusters the distinct non-empty keys,
//! picks a representative per cluster, and maps every input back to the
//! first-seen original form of its representative.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clustering::cluster;
use crate::config::UnifyOptions;
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::normalization::Normalizer;
use crate::representative::{code_unit_cmp, select_representative};

/// Values that were unified to one representative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedGroup {
    /// The original value every member was replaced with
    pub representative: String,
    /// Distinct original values mapped to the representative, in input order
    pub members: Vec<String>,
}

/// Unified values together with the grouping that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unification {
    /// One entry per input value, same order
    pub values: Vec<String>,
    /// Groups ordered by the first input position of any member
    pub groups: Vec<UnifiedGroup>,
}

/// Replace every value with the canonical original form of its group.
///
/// The result has the same length and order as `values`, and every entry is
/// one of the input strings.
pub fn unify_values<S: AsRef<str>>(values: &[S], options: &UnifyOptions) -> Result<Vec<String>> {
    let resolved = resolve(values, options)?;
    Ok(resolved.into_iter().map(str::to_string).collect())
}

/// Like [`unify_values`], also reporting which inputs were grouped together.
pub fn unify_report<S: AsRef<str>>(values: &[S], options: &UnifyOptions) -> Result<Unification> {
    let resolved = resolve(values, options)?;

    let mut groups: Vec<UnifiedGroup> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for (value, &representative) in values.iter().zip(&resolved) {
        let idx = *group_index.entry(representative).or_insert_with(|| {
            groups.push(UnifiedGroup {
                representative: representative.to_string(),
                members: Vec::new(),
            });
            groups.len() - 1
        });

        let member = value.as_ref();
        let group = &mut groups[idx];
        if !group.members.iter().any(|m| m == member) {
            group.members.push(member.to_string());
        }
    }

    Ok(Unification {
        values: resolved.into_iter().map(str::to_string).collect(),
        groups,
    })
}

/// Resolve each input to the original value it should be replaced with
fn resolve<'v, S: AsRef<str>>(values: &'v [S], options: &UnifyOptions) -> Result<Vec<&'v str>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let normalizer = Normalizer::new(options)?;

    let mut value_keys: Vec<String> = Vec::with_capacity(values.len());
    let mut first_seen: HashMap<String, &'v str> = HashMap::new();
    let mut first_empty: Option<&'v str> = None;

    for value in values {
        let original = value.as_ref();
        let key = normalizer.normalize(original)?;
        if key.is_empty() {
            first_empty.get_or_insert(original);
        } else {
            first_seen.entry(key.clone()).or_insert(original);
        }
        value_keys.push(key);
    }

    let mut keys: Vec<&str> = first_seen.keys().map(String::as_str).collect();
    keys.sort_unstable_by(|a, b| code_unit_cmp(a, b));

    debug!(
        values = values.len(),
        keys = keys.len(),
        has_empty = first_empty.is_some(),
        "normalized values"
    );

    let replacements = if keys.is_empty() {
        HashMap::new()
    } else {
        representative_originals(&keys, &first_seen, options)
    };

    Ok(values
        .iter()
        .zip(&value_keys)
        .map(|(value, key)| {
            let fallback = value.as_ref();
            if key.is_empty() {
                first_empty.unwrap_or(fallback)
            } else {
                replacements.get(key.as_str()).copied().unwrap_or(fallback)
            }
        })
        .collect())
}

/// Map every sorted key to the first-seen original of its cluster's
/// representative key
fn representative_originals<'k, 'v>(
    keys: &[&'k str],
    first_seen: &HashMap<String, &'v str>,
    options: &UnifyOptions,
) -> HashMap<&'k str, &'v str> {
    let matrix = DistanceMatrix::build(keys, options.distance_metric);
    let clusters = cluster(&matrix, options.cluster_linkage, options.distance_threshold);

    let mut replacements = HashMap::with_capacity(keys.len());
    for indices in &clusters {
        let cluster_keys: Vec<&'k str> = indices.iter().map(|&i| keys[i]).collect();

        // undersized clusters keep every key as its own representative
        let undersized = cluster_keys.len() < options.min_cluster_size_for_representation_change;
        let representative = if undersized {
            None
        } else {
            select_representative(&cluster_keys, indices, options.representative_strategy, &matrix)
        };

        for &key in &cluster_keys {
            replacements.insert(key, first_seen[representative.unwrap_or(key)]);
        }
    }

    debug!(
        clusters = clusters.len(),
        merged = clusters.iter().filter(|c| c.len() > 1).count(),
        "selected representatives"
    );
    replacements
}

#[cfg(feature = "native")]
#[uniffi::export]
pub fn unify_values_ffi(
    values: Vec<String>,
    options: crate::config::FfiUnifyOptions,
) -> std::result::Result<Vec<String>, crate::error::UnifyError> {
    unify_values(&values, &options.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preprocessor, RepresentativeStrategy};
    use crate::error::UnifyError;

    fn unify(values: &[&str]) -> Vec<String> {
        unify_values(values, &UnifyOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let values: [&str; 0] = [];
        assert!(unify(&values).is_empty());
    }

    #[test]
    fn test_empty_values_map_to_first_empty() {
        assert_eq!(unify(&["", "", "Acme"]), vec!["", "", "Acme"]);
        assert_eq!(unify(&["...", "Acme", "  ", "-"]), vec!["...", "Acme", "...", "..."]);
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(unify(&["()", "", "  "]), vec!["()", "()", "()"]);
    }

    #[test]
    fn test_duplicate_collapse() {
        let result = unify(&["Coca-Cola", "coca cola", "COCA COLA"]);
        // keys "coca cola" and "cocacola" tie on medoid; the first sorted key wins
        assert_eq!(result, vec!["coca cola", "coca cola", "coca cola"]);
    }

    #[test]
    fn test_first_seen_original_is_displayed() {
        let result = unify(&["ACME", "Acme", "acme."]);
        assert_eq!(result, vec!["ACME", "ACME", "ACME"]);
    }

    #[test]
    fn test_unrelated_values_stay_apart() {
        let values = ["Acme", "Globex", "Initech"];
        assert_eq!(unify(&values), values.to_vec());
    }

    #[test]
    fn test_min_cluster_size_gate() {
        let options = UnifyOptions {
            min_cluster_size_for_representation_change: 3,
            ..Default::default()
        };
        let values = ["Coca-Cola", "coca cola", "Pepsi"];
        let result = unify_values(&values, &options).unwrap();
        assert_eq!(result, values.to_vec());
    }

    #[test]
    fn test_representative_strategy() {
        let options = UnifyOptions {
            representative_strategy: RepresentativeStrategy::Longest,
            ..Default::default()
        };
        let result = unify_values(&["Acme", "Acme Corp"], &options).unwrap();
        assert_eq!(result, vec!["Acme Corp", "Acme Corp"]);
    }

    #[test]
    fn test_preprocessor_error_aborts() {
        let options = UnifyOptions::default().with_preprocessor(Preprocessor::new(|value| {
            if value == "bad" {
                Err("rejected".into())
            } else {
                Ok(value.to_string())
            }
        }));
        let result = unify_values(&["good", "bad"], &options);
        assert!(matches!(result, Err(UnifyError::Preprocessor { ref value, .. }) if value == "bad"));
    }

    #[test]
    fn test_report_groups() {
        let report = unify_report(&["Acme", "Globex", "ACME", "acme", ""], &UnifyOptions::default()).unwrap();
        assert_eq!(report.values, vec!["Acme", "Globex", "Acme", "Acme", ""]);
        assert_eq!(
            report.groups,
            vec![
                UnifiedGroup {
                    representative: "Acme".to_string(),
                    members: vec!["Acme".to_string(), "ACME".to_string(), "acme".to_string()],
                },
                UnifiedGroup {
                    representative: "Globex".to_string(),
                    members: vec!["Globex".to_string()],
                },
                UnifiedGroup {
                    representative: String::new(),
                    members: vec![String::new()],
                },
            ]
        );
    }
}
