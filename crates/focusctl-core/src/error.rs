use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FocusError {
    #[error("unknown focus mode '{0}'")]
    UnknownMode(String),

    #[error("invalid action '{0}': expected on, off, or toggle")]
    InvalidAction(String),

    #[error("failed to {operation} {mode} focus mode: {message}")]
    System {
        mode: String,
        operation: String,
        message: String,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("failed to {op} {}", .path.display())]
    FileOp {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FocusError {
    /// Build a `map_err` adapter that tags an I/O failure with the operation and path.
    pub(crate) fn file_op(
        op: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| FocusError::FileOp { op, path, source }
    }
}

pub type Result<T> = std::result::Result<T, FocusError>;
