//! Pairwise distance matrix over distinct normalized keys

use crate::config::DistanceMetric;
use crate::similarity::{fuzzy_ratio, jaro_winkler, token_set_ratio};

/// Square, symmetric, zero-diagonal matrix of distances in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute distances between every pair of keys.
    pub fn build<S: AsRef<str>>(keys: &[S], metric: DistanceMetric) -> Self {
        let size = keys.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = distance(keys[i].as_ref(), keys[j].as_ref(), metric);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }

        Self { size, values }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between key `i` and key `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&[f64]]) -> Self {
        let size = rows.len();
        let values = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self { size, values }
    }
}

/// Distance between two keys under `metric`
pub fn distance(a: &str, b: &str, metric: DistanceMetric) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 0.0,
        (true, false) | (false, true) => return 1.0,
        (false, false) => {}
    }

    let similarity = match metric {
        DistanceMetric::Levenshtein => fuzzy_ratio(a, b),
        DistanceMetric::JaroWinkler => jaro_winkler(a, b),
        DistanceMetric::TokenSetRatio => token_set_ratio(a, b),
    };
    1.0 - similarity
}
