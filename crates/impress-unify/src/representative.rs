//! Canonical key selection for a cluster

use crate::config::RepresentativeStrategy;
use crate::matrix::DistanceMatrix;
use std::cmp::Ordering;

/// Compare strings by UTF-16 code units. Differs from `str` ordering only
/// when U+E000..=U+FFFF meets a supplementary-plane character.
pub fn code_unit_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Pick the representative key of one cluster.
///
/// `cluster_keys[k]` is the key at matrix index `indices[k]`. Returns `None`
/// only for an empty cluster.
pub fn select_representative<'a>(
    cluster_keys: &[&'a str],
    indices: &[usize],
    strategy: RepresentativeStrategy,
    matrix: &DistanceMatrix,
) -> Option<&'a str> {
    match strategy {
        RepresentativeStrategy::Medoid => medoid(cluster_keys, indices, matrix),
        RepresentativeStrategy::Shortest => cluster_keys
            .iter()
            .copied()
            .min_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b))),
        RepresentativeStrategy::Longest => cluster_keys
            .iter()
            .copied()
            .min_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))),
        RepresentativeStrategy::FirstAlphabetical => {
            cluster_keys.iter().copied().min_by(|a, b| code_unit_cmp(a, b))
        }
    }
}

/// Member with the smallest total distance to the rest of its cluster.
/// Ties keep the earliest member.
fn medoid<'a>(cluster_keys: &[&'a str], indices: &[usize], matrix: &DistanceMatrix) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for (&key, &idx) in cluster_keys.iter().zip(indices) {
        let total: f64 = indices.iter().map(|&other| matrix.get(idx, other)).sum();
        if best.map_or(true, |(_, min)| total < min) {
            best = Some((key, total));
        }
    }
    best.map(|(key, _)| key)
}
