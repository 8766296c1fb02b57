//! Department satisfaction classification over employee survey records.
//!
//! Employee tables are loaded into Arrow record batches, conformed to a
//! fixed employee schema and classified per department: a department is
//! reported when its share of satisfied, engaged employees exceeds a
//! threshold.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod models;
pub mod schema;
pub mod utils;

// Core types
pub use config::{ClassifierConfig, OutputConfig, OutputFormat, ReaderConfig};
pub use error::{EngagementError, Result};
pub use models::{DepartmentResult, EmployeeRecord};

// Classification
pub use algorithm::classification::{
    ClassificationSummary, DepartmentClassifier, DepartmentStats,
    identify_departments_high_satisfaction,
};

// Filtering capabilities
pub use filter::{BatchFilter, Expr, ExpressionFilter, LiteralValue};

// Loading and writing
pub use io::{read_employees, read_employees_async, write_results};

// Arrow types
pub use arrow::record_batch::RecordBatch;
