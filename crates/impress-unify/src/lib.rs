//! impress-unify: Fuzzy value unification for impress apps.
//!
//! Collapses free-text values that name the same thing but differ in
//! spelling, casing, punctuation, or formatting ("Coca-Cola", "coca cola",
//! "COCA COLA CO.") onto one canonical original value per group:
//! - Normalization into comparison keys (diacritic folding, casing, edge and
//!   interior character removal, whitespace collapsing)
//! - Pairwise distances (fuzzy ratio, Jaro-Winkler, token-set ratio)
//! - Threshold-stopped agglomerative clustering (single, complete, average)
//! - Representative selection (medoid, shortest, longest, first alphabetical)
//!
//! ```
//! use impress_unify::{unify_values, UnifyOptions};
//!
//! let values = ["Coca-Cola", "coca cola", "COCA COLA", "Pepsi"];
//! let unified = unify_values(&values, &UnifyOptions::default()).unwrap();
//! assert_eq!(unified, vec!["coca cola", "coca cola", "coca cola", "Pepsi"]);
//! ```

#[cfg(feature = "native")]
uniffi::setup_scaffolding!();

pub mod clustering;
pub mod config;
pub mod error;
pub mod matrix;
pub mod normalization;
pub mod orchestration;
pub mod representative;
pub mod similarity;

pub use clustering::{cluster, Cluster};
pub use config::{
    ClusterLinkage, DistanceMetric, Preprocessor, RepresentativeStrategy, UnifyOptions,
};
#[cfg(feature = "native")]
pub use config::{default_unify_options, FfiUnifyOptions};
pub use error::{PreprocessError, Result, UnifyError};
pub use matrix::DistanceMatrix;
pub use normalization::Normalizer;
pub use orchestration::{unify_report, unify_values, UnifiedGroup, Unification};
#[cfg(feature = "native")]
pub use orchestration::unify_values_ffi;
pub use representative::{code_unit_cmp, select_representative};
