//! Threshold-stopped agglomerative clustering
//!
//! Starts from singletons and repeatedly merges the closest pair of
//! clusters until the closest pair is farther apart than the threshold.
//! Each round rescans every pair, so the loop is O(n³) in the number of
//! distinct keys.

use tracing::{debug, trace};

use crate::config::ClusterLinkage;
use crate::matrix::DistanceMatrix;

/// Key indices belonging to one cluster, in merge order
pub type Cluster = Vec<usize>;

/// Partition the keys of `matrix` into clusters.
///
/// Pairs are scanned in ascending `(i, j)` order over the current cluster
/// list and the first pair with the strictly smallest linkage distance is
/// merged. The merged cluster (members of `i` followed by members of `j`)
/// is appended to the end of the list.
pub fn cluster(matrix: &DistanceMatrix, linkage: ClusterLinkage, threshold: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = (0..matrix.len()).map(|i| vec![i]).collect();

    while clusters.len() >= 2 {
        let mut min_dist = f64::INFINITY;
        let mut pair: Option<(usize, usize)> = None;

        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let d = linkage_distance(&clusters[i], &clusters[j], matrix, linkage);
                if d < min_dist {
                    min_dist = d;
                    pair = Some((i, j));
                }
            }
        }

        match pair {
            // a NaN threshold never admits a merge
            Some((i, j)) if min_dist <= threshold => {
                trace!(distance = min_dist, "merging clusters {:?} and {:?}", clusters[i], clusters[j]);
                let second = clusters.remove(j);
                let mut merged = clusters.remove(i);
                merged.extend(second);
                clusters.push(merged);
            }
            _ => break,
        }
    }

    debug!(
        keys = matrix.len(),
        clusters = clusters.len(),
        %linkage,
        threshold,
        "clustering finished"
    );
    clusters
}

/// Cluster-to-cluster distance under `linkage`
pub fn linkage_distance(
    a: &[usize],
    b: &[usize],
    matrix: &DistanceMatrix,
    linkage: ClusterLinkage,
) -> f64 {
    let pairwise = a
        .iter()
        .flat_map(|&x| b.iter().map(move |&y| matrix.get(x, y)));

    match linkage {
        ClusterLinkage::Single => pairwise.fold(f64::INFINITY, f64::min),
        ClusterLinkage::Complete => pairwise.fold(f64::NEG_INFINITY, f64::max),
        ClusterLinkage::Average => {
            let (sum, count) = pairwise.fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));
            sum / count as f64
        }
    }
}
