// src/error.rs

//! Error types for loading, updating and saving package configs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while working with package configs
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse update manifest: {0}")]
    Manifest(#[from] toml::de::Error),
}

impl Error {
    /// Build a parse error for the given file
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = Error::NotFound(PathBuf::from("/tmp/default.config"));
        assert_eq!(err.to_string(), "Config file not found: /tmp/default.config");

        let err = Error::parse("sub.config", "unclosed element");
        assert_eq!(err.to_string(), "Failed to parse sub.config: unclosed element");
    }
}
