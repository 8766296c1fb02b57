//! Shared helpers for logging, console output and test data

pub mod logging;
pub mod test;

pub use logging::{log_operation_complete, log_operation_start, log_warning};
