//! Logging utilities
//!
//! Standardized messages for file operations, so every reader and writer
//! reports the same way.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense verb for the operation ("read", "wrote")
/// * `path` - Path of the file or directory that was operated on
/// * `count` - Number of things processed
/// * `unit` - What was counted ("rows", "departments")
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    count: usize,
    unit: &str,
    elapsed: Option<Duration>,
) {
    let timing = elapsed.map(|d| format!(" in {d:?}")).unwrap_or_default();
    log::info!(
        "Successfully {operation} {count} {unit} at {}{timing}",
        path.display()
    );
}

/// Log an operation warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{}: {}", message, path.display()),
        None => log::warn!("{message}"),
    }
}
