//! Utility functions for error handling
//!
//! Helpers that attach path and purpose context to filesystem failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{EngagementError, Result};

/// Open a file for reading with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(EngagementError::io_at(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found, needed for: {purpose}"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(EngagementError::io_at(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file, expected a file for: {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let kind = e.kind();
        let context = match kind {
            io::ErrorKind::PermissionDenied => {
                "permission denied, check file permissions".to_string()
            }
            _ => format!("failed to open file for {purpose}: {e}"),
        };
        EngagementError::io_at(path, io::Error::new(kind, context))
    })
}

/// Create (or truncate) a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EngagementError::io_at(parent, e))?;
    }

    if path.is_dir() {
        return Err(EngagementError::io_at(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is a directory, expected a file for: {purpose}"),
            ),
        ));
    }

    fs::File::create(path).map_err(|e| EngagementError::io_at(path, e))
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(EngagementError::io_at(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found, needed for: {purpose}"),
            ),
        ));
    }

    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| EngagementError::io_at(path, e))
}
