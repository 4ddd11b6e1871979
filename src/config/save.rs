// src/config/save.rs

//! Outcome of writing one config document

use crate::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result of a single file save
#[derive(Debug)]
pub struct FileSaveResult {
    path: PathBuf,
    error: Option<Error>,
}

impl FileSaveResult {
    pub fn success(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            error: None,
        }
    }

    pub fn failure(path: impl Into<PathBuf>, error: Error) -> Self {
        Self {
            path: path.into(),
            error: Some(error),
        }
    }

    /// Path of the file that was written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the write succeeded
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Error captured while writing, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }
}

/// Two results are equal when they name the same path and agree on success;
/// the captured errors themselves are not compared.
impl PartialEq for FileSaveResult {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.succeeded() == other.succeeded()
    }
}

impl Eq for FileSaveResult {}

impl fmt::Display for FileSaveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "Saved {}", self.path.display()),
            Some(e) => write!(f, "Failed {}: {}", self.path.display(), e),
        }
    }
}
