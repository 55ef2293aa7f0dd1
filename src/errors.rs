//! Error types for phone masking operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for masking operations.
#[derive(Debug, Error)]
pub enum MaskError {
    /// IO errors (missing input, permission denied, write failure,
    /// non-UTF-8 content)
    #[error("IO error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Detection pattern failed to compile
    #[error("Invalid pattern '{pattern}': {error}")]
    Pattern { pattern: String, error: String },

    /// Policy file could not be loaded or parsed
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Input claimed to be JSON but did not parse
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Input claimed to be XML but did not parse
    #[error("Invalid XML: {0}")]
    InvalidXml(String),
}

impl MaskError {
    /// Create an IO error carrying the offending path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for masking operations.
pub type MaskResult<T> = Result<T, MaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = MaskError::io(
            Path::new("/tmp/missing.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/tmp/missing.txt"));
    }

    #[test]
    fn test_config_error_message() {
        let err = MaskError::config("bad policy");
        assert_eq!(err.to_string(), "Invalid configuration: bad policy");
    }
}
