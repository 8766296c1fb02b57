//! Error helpers for the filter module

use crate::error::{EngagementError, Result};

/// Create a filter error result
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(EngagementError::filter(message.as_ref()))
}

/// Create a column not found error
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    filter_err(format!("Column '{column_name}' not found"))
}

/// Create a column type error
pub fn column_type_error<T>(column_name: &str, expected_type: &str) -> Result<T> {
    filter_err(format!(
        "Column '{column_name}' is not a {expected_type} array"
    ))
}

/// Extension trait to attach expression context to kernel failures
pub trait FilterResultExt<T> {
    /// Add context about the expression being evaluated
    fn with_expr_context(self, expr: impl std::fmt::Debug) -> Result<T>;
}

impl<T, E: std::fmt::Display> FilterResultExt<T> for std::result::Result<T, E> {
    fn with_expr_context(self, expr: impl std::fmt::Debug) -> Result<T> {
        self.map_err(|e| EngagementError::filter(format!("Error evaluating {expr:?}: {e}")))
    }
}
