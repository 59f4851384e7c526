//! Typed error handling for deadroute.
//!
//! Provides structured errors that library consumers can match on,
//! with the file that caused the failure.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for deadroute operations.
#[derive(Error, Debug)]
pub enum DeadrouteError {
    /// I/O error when reading a source file
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl DeadrouteError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get the file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Config { path, .. } => path,
        }
    }
}

/// Convenience type alias for deadroute results.
pub type DeadrouteResult<T> = Result<T, DeadrouteError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadrouteResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadrouteResult<T> {
        self.map_err(|e| DeadrouteError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = DeadrouteError::io(
            PathBuf::from("/src/UserController.kt"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, DeadrouteError::Io { .. }));
        assert_eq!(err.path(), Path::new("/src/UserController.kt"));
        assert!(err.to_string().contains("UserController.kt"));
    }

    #[test]
    fn test_config_error() {
        let err = DeadrouteError::config("/proj/deadroute.toml", "expected array");
        assert_eq!(err.path(), Path::new("/proj/deadroute.toml"));
        assert!(err.to_string().starts_with("Config error at /proj/deadroute.toml"));
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/missing/Foo.kt").unwrap_err();
        assert_eq!(err.path(), Path::new("/missing/Foo.kt"));
    }
}
