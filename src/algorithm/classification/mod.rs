//! Department classification
//!
//! Identifies departments where the share of satisfied, engaged employees
//! exceeds a threshold.

pub mod classifier;
pub mod statistics;

pub use classifier::{
    DepartmentClassifier, identify_departments_high_satisfaction, qualification_expr,
};
pub use statistics::{
    ClassificationSummary, DepartmentStats, DepartmentTally, high_satisfaction_percentage,
};
