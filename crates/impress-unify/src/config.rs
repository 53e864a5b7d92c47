//! Unification options.
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! distance_threshold = 0.25
//! distance_metric = "jaro_winkler"
//! cluster_linkage = "complete"
//! representative_strategy = "longest"
//! lowercase = true
//! strip_chars = " .-,()[]{}"
//! remove_internal_chars = ".,-()[]{}"
//! min_cluster_size_for_representation_change = 2
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, Result, UnifyError};

pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.35;
pub const DEFAULT_STRIP_CHARS: &str = " .-,()[]{}";
pub const DEFAULT_REMOVE_INTERNAL_CHARS: &str = ".,-()[]{}";

/// Pairwise string distance used to build the distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Levenshtein,
    JaroWinkler,
    #[default]
    TokenSetRatio,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Levenshtein => "levenshtein",
            DistanceMetric::JaroWinkler => "jaro_winkler",
            DistanceMetric::TokenSetRatio => "token_set_ratio",
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = UnifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "levenshtein" => Ok(DistanceMetric::Levenshtein),
            "jaro_winkler" => Ok(DistanceMetric::JaroWinkler),
            "token_set_ratio" => Ok(DistanceMetric::TokenSetRatio),
            other => Err(UnifyError::UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule for deriving a cluster-to-cluster distance from member distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum ClusterLinkage {
    #[default]
    Average,
    Single,
    Complete,
}

impl ClusterLinkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterLinkage::Average => "average",
            ClusterLinkage::Single => "single",
            ClusterLinkage::Complete => "complete",
        }
    }
}

impl FromStr for ClusterLinkage {
    type Err = UnifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average" => Ok(ClusterLinkage::Average),
            "single" => Ok(ClusterLinkage::Single),
            "complete" => Ok(ClusterLinkage::Complete),
            other => Err(UnifyError::UnknownLinkage(other.to_string())),
        }
    }
}

impl fmt::Display for ClusterLinkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the canonical key of a cluster is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
#[serde(rename_all = "snake_case")]
pub enum RepresentativeStrategy {
    #[default]
    Medoid,
    Shortest,
    Longest,
    FirstAlphabetical,
}

impl RepresentativeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepresentativeStrategy::Medoid => "medoid",
            RepresentativeStrategy::Shortest => "shortest",
            RepresentativeStrategy::Longest => "longest",
            RepresentativeStrategy::FirstAlphabetical => "first_alphabetical",
        }
    }
}

impl FromStr for RepresentativeStrategy {
    type Err = UnifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "medoid" => Ok(RepresentativeStrategy::Medoid),
            "shortest" => Ok(RepresentativeStrategy::Shortest),
            "longest" => Ok(RepresentativeStrategy::Longest),
            "first_alphabetical" => Ok(RepresentativeStrategy::FirstAlphabetical),
            other => Err(UnifyError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for RepresentativeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type PreprocessFn = dyn Fn(&str) -> std::result::Result<String, PreprocessError> + Send + Sync;

/// Caller-supplied transform applied to every raw value before normalization.
///
/// Within one unification call it is invoked sequentially, once per input
/// value, in input order.
#[derive(Clone)]
pub struct Preprocessor(Arc<PreprocessFn>);

impl Preprocessor {
    /// Wrap a fallible transform. An `Err` aborts the unification call.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, PreprocessError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap a transform that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |value| Ok(f(value)))
    }

    pub(crate) fn apply(&self, value: &str) -> Result<String> {
        (self.0)(value).map_err(|source| UnifyError::Preprocessor {
            value: value.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Preprocessor(..)")
    }
}

/// Options for a unification call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnifyOptions {
    /// Maximum linkage distance at which two clusters still merge
    pub distance_threshold: f64,
    pub distance_metric: DistanceMetric,
    pub cluster_linkage: ClusterLinkage,
    pub representative_strategy: RepresentativeStrategy,
    pub lowercase: bool,
    /// Characters stripped from both ends of a value
    pub strip_chars: String,
    /// Characters removed anywhere in a value
    pub remove_internal_chars: String,
    /// Clusters smaller than this keep every member unchanged
    pub min_cluster_size_for_representation_change: usize,
    #[serde(skip)]
    pub preprocessor: Option<Preprocessor>,
}

impl Default for UnifyOptions {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            distance_metric: DistanceMetric::default(),
            cluster_linkage: ClusterLinkage::default(),
            representative_strategy: RepresentativeStrategy::default(),
            lowercase: true,
            strip_chars: DEFAULT_STRIP_CHARS.to_string(),
            remove_internal_chars: DEFAULT_REMOVE_INTERNAL_CHARS.to_string(),
            min_cluster_size_for_representation_change: 1,
            preprocessor: None,
        }
    }
}

impl UnifyOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }
}

/// FFI-safe mirror of [`UnifyOptions`] without a preprocessor
#[cfg(feature = "native")]
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUnifyOptions {
    pub distance_threshold: f64,
    pub distance_metric: DistanceMetric,
    pub cluster_linkage: ClusterLinkage,
    pub representative_strategy: RepresentativeStrategy,
    pub lowercase: bool,
    pub strip_chars: String,
    pub remove_internal_chars: String,
    pub min_cluster_size_for_representation_change: u32,
}

#[cfg(feature = "native")]
impl From<FfiUnifyOptions> for UnifyOptions {
    fn from(options: FfiUnifyOptions) -> Self {
        Self {
            distance_threshold: options.distance_threshold,
            distance_metric: options.distance_metric,
            cluster_linkage: options.cluster_linkage,
            representative_strategy: options.representative_strategy,
            lowercase: options.lowercase,
            strip_chars: options.strip_chars,
            remove_internal_chars: options.remove_internal_chars,
            min_cluster_size_for_representation_change: options
                .min_cluster_size_for_representation_change
                as usize,
            preprocessor: None,
        }
    }
}

#[cfg(feature = "native")]
#[uniffi::export]
pub fn default_unify_options() -> FfiUnifyOptions {
    let options = UnifyOptions::default();
    FfiUnifyOptions {
        distance_threshold: options.distance_threshold,
        distance_metric: options.distance_metric,
        cluster_linkage: options.cluster_linkage,
        representative_strategy: options.representative_strategy,
        lowercase: options.lowercase,
        strip_chars: options.strip_chars,
        remove_internal_chars: options.remove_internal_chars,
        min_cluster_size_for_representation_change: options
            .min_cluster_size_for_representation_change
            as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = UnifyOptions::default();
        assert_eq!(options.distance_threshold, 0.35);
        assert_eq!(options.distance_metric, DistanceMetric::TokenSetRatio);
        assert_eq!(options.cluster_linkage, ClusterLinkage::Average);
        assert_eq!(options.representative_strategy, RepresentativeStrategy::Medoid);
        assert!(options.lowercase);
        assert_eq!(options.strip_chars, " .-,()[]{}");
        assert_eq!(options.remove_internal_chars, ".,-()[]{}");
        assert_eq!(options.min_cluster_size_for_representation_change, 1);
        assert!(options.preprocessor.is_none());
    }

    #[test]
    fn parse_enum_names() {
        assert_eq!("levenshtein".parse::<DistanceMetric>().unwrap(), DistanceMetric::Levenshtein);
        assert_eq!("jaro_winkler".parse::<DistanceMetric>().unwrap(), DistanceMetric::JaroWinkler);
        assert_eq!("single".parse::<ClusterLinkage>().unwrap(), ClusterLinkage::Single);
        assert_eq!(
            "first_alphabetical".parse::<RepresentativeStrategy>().unwrap(),
            RepresentativeStrategy::FirstAlphabetical
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            "cosine".parse::<DistanceMetric>(),
            Err(UnifyError::UnknownMetric(name)) if name == "cosine"
        ));
        assert!(matches!(
            "ward".parse::<ClusterLinkage>(),
            Err(UnifyError::UnknownLinkage(_))
        ));
        assert!(matches!(
            "random".parse::<RepresentativeStrategy>(),
            Err(UnifyError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for metric in [
            DistanceMetric::Levenshtein,
            DistanceMetric::JaroWinkler,
            DistanceMetric::TokenSetRatio,
        ] {
            assert_eq!(metric.to_string().parse::<DistanceMetric>().unwrap(), metric);
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let options = UnifyOptions::from_toml_str(
            r#"
            distance_threshold = 0.2
            distance_metric = "levenshtein"
            "#,
        )
        .unwrap();
        assert_eq!(options.distance_threshold, 0.2);
        assert_eq!(options.distance_metric, DistanceMetric::Levenshtein);
        assert_eq!(options.cluster_linkage, ClusterLinkage::Average);
        assert_eq!(options.strip_chars, DEFAULT_STRIP_CHARS);
    }

    #[test]
    fn toml_rejects_unknown_metric() {
        let result = UnifyOptions::from_toml_str(r#"distance_metric = "cosine""#);
        assert!(matches!(result, Err(UnifyError::Config(_))));
    }

    #[test]
    fn toml_rejects_unknown_field() {
        let result = UnifyOptions::from_toml_str("treshold = 0.5");
        assert!(matches!(result, Err(UnifyError::Config(_))));
    }

    #[test]
    fn preprocessor_error_carries_value() {
        let preprocessor = Preprocessor::new(|_| Err("boom".into()));
        match preprocessor.apply("Acme") {
            Err(UnifyError::Preprocessor { value, source }) => {
                assert_eq!(value, "Acme");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("expected preprocessor error, got {:?}", other),
        }
    }
}
