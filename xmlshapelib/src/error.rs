//! Error types for xmlshapelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning an XML corpus
#[derive(Error, Debug)]
pub enum XmlShapeError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File contents are not UTF-8 (e.g. an ISO-8859-1 record)
    #[error("unsupported encoding in '{path}': {message}")]
    Encoding { path: PathBuf, message: String },

    /// A `.xml` file is not well-formed XML
    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Invalid value-collapsing pattern
    #[error("invalid collapse pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XmlShapeError {
    /// Whether this error only affects a single document.
    ///
    /// Per-document errors are recorded and skipped during a scan; every
    /// other error aborts it.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            XmlShapeError::FileRead { .. }
                | XmlShapeError::Encoding { .. }
                | XmlShapeError::Parse { .. }
        )
    }
}
