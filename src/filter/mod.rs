//! Filtering capabilities for employee record batches
//!
//! This module provides a flexible expression-based filtering system,
//! allowing you to select rows based on column values.

pub mod core;
pub mod error;
pub mod expr;

pub use core::{BatchFilter, filter_record_batch};
pub use expr::{Expr, ExpressionFilter, LiteralValue, eq_filter, in_filter};
