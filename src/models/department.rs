//! Department classification result model

use std::fmt;

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::traits::ArrowSchema;

pub const DEPARTMENT_COLUMN: &str = "Department";
pub const PERCENTAGE_COLUMN: &str = "HighSatisfactionPercentage";

/// A department whose share of qualifying employees exceeded the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentResult {
    #[serde(rename = "Department")]
    pub department: String,
    /// Share of qualifying employees in percent, rounded to two decimals
    #[serde(rename = "HighSatisfactionPercentage")]
    pub high_satisfaction_percentage: f64,
}

impl DepartmentResult {
    #[must_use]
    pub fn new(department: impl Into<String>, high_satisfaction_percentage: f64) -> Self {
        Self {
            department: department.into(),
            high_satisfaction_percentage,
        }
    }
}

impl fmt::Display for DepartmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.department, self.high_satisfaction_percentage)
    }
}

impl ArrowSchema for DepartmentResult {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new(DEPARTMENT_COLUMN, DataType::Utf8, false),
            Field::new(PERCENTAGE_COLUMN, DataType::Float64, false),
        ])
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }

    fn to_record_batch(results: &[Self]) -> Result<RecordBatch> {
        Ok(serde_arrow::to_record_batch(&Self::fields(), &results)?)
    }
}
