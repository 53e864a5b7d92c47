//! Error types for impress-unify

use thiserror::Error;

/// Result type alias for unification operations
pub type Result<T> = std::result::Result<T, UnifyError>;

/// Boxed error returned by a caller-supplied preprocessor
pub type PreprocessError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for unification operations
#[derive(Error, Debug)]
#[cfg_attr(feature = "native", derive(uniffi::Error), uniffi(flat_error))]
pub enum UnifyError {
    /// Distance metric name not recognized
    #[error("Unknown distance metric: {0}")]
    UnknownMetric(String),

    /// Cluster linkage name not recognized
    #[error("Unknown cluster linkage: {0}")]
    UnknownLinkage(String),

    /// Representative strategy name not recognized
    #[error("Unknown representative strategy: {0}")]
    UnknownStrategy(String),

    /// The caller-supplied preprocessor failed on a value
    #[error("Preprocessor failed on {value:?}: {source}")]
    Preprocessor {
        value: String,
        #[source]
        source: PreprocessError,
    },

    /// A strip/remove character class could not be compiled
    #[error("Invalid character class: {0}")]
    Pattern(#[from] regex::Error),

    /// Options file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Options file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
