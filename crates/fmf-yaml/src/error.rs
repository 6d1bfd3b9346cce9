//! Error types for fmf-yaml

/// Result type for fmf-yaml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fmf-yaml operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse YAML: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("Failed to serialize YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Cannot represent value tagged {tag} (enable stringify_unknown to render it as text)")]
    Unrepresentable { tag: String },

    #[error(transparent)]
    Fs(#[from] fmf_fs::Error),
}
