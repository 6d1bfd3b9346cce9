//! Error types for frontmatter-format

use std::path::{Path, PathBuf};

/// Result type for frontmatter-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in frontmatter-format operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file's frontmatter is malformed.
    #[error("Invalid frontmatter in {path}: {message}")]
    Format { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] fmf_yaml::Error),

    #[error(transparent)]
    Config(fmf_fs::Error),
}

impl Error {
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Kind of the underlying I/O failure, if this is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Yaml(fmf_yaml::Error::Fs(e)) | Self::Config(e) => e.io_kind(),
            _ => None,
        }
    }
}

impl From<fmf_fs::Error> for Error {
    fn from(err: fmf_fs::Error) -> Self {
        match err {
            fmf_fs::Error::Io { path, source } => Self::Io { path, source },
            other => Self::Config(other),
        }
    }
}
