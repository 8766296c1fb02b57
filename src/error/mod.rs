//! Error handling for engagement-reader.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for loading, classifying and writing employee data
#[derive(Debug, thiserror::Error)]
pub enum EngagementError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO error tied to a specific file
    #[error("IO error at {}: {source}", path.display())]
    IoAt {
        /// File the operation was targeting
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Error from an Arrow kernel, reader or writer
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error serializing results to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source file holds values that cannot be read into the employee schema
    #[error("Invalid data in {}: {message}", path.display())]
    InvalidData {
        /// File the values came from
        path: PathBuf,
        message: String,
    },

    /// Error converting between typed records and record batches
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// A batch does not match the employee schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// A filter expression could not be evaluated
    #[error("Filter error: {0}")]
    Filter(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngagementError {
    /// Wrap an IO error with the path it occurred on
    pub fn io_at(path: &Path, source: io::Error) -> Self {
        Self::IoAt {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_data(path: &Path, message: impl Into<String>) -> Self {
        Self::InvalidData {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub fn filter(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<serde_arrow::Error> for EngagementError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Conversion(error.to_string())
    }
}

/// Result type for engagement-reader operations
pub type Result<T> = std::result::Result<T, EngagementError>;
