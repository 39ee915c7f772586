//! Error types for configuration loading and file output.

use std::path::PathBuf;

use unitconv_core::GenerationError;

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("failed to access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no unitconv.toml found in standard locations")]
    ConfigNotFound,

    #[error("`[numeric.{0}]` names no known category")]
    UnknownCategory(String),

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> GeneratorError {
        let path = path.into();
        move |source| GeneratorError::Io { path, source }
    }
}
