//! Employee survey record model
//!
//! One row of the survey table. Every field is optional because the loaders
//! map empty cells to null, and null values are meaningful downstream
//! (a null rating or engagement level never qualifies, a null employee id is
//! not counted).

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::traits::ArrowSchema;

/// Column names of the employee survey table
pub mod columns {
    pub const EMPLOYEE_ID: &str = "EmployeeID";
    pub const DEPARTMENT: &str = "Department";
    pub const JOB_TITLE: &str = "JobTitle";
    pub const SATISFACTION_RATING: &str = "SatisfactionRating";
    pub const ENGAGEMENT_LEVEL: &str = "EngagementLevel";
    pub const REPORTS_CONCERNS: &str = "ReportsConcerns";
    pub const PROVIDED_SUGGESTIONS: &str = "ProvidedSuggestions";

    /// Columns the department classifier reads
    pub const CLASSIFIER_COLUMNS: [&str; 4] =
        [EMPLOYEE_ID, DEPARTMENT, SATISFACTION_RATING, ENGAGEMENT_LEVEL];
}

/// A single employee survey response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: Option<i32>,
    #[serde(rename = "Department")]
    pub department: Option<String>,
    #[serde(rename = "JobTitle")]
    pub job_title: Option<String>,
    /// Satisfaction on a 1-5 scale
    #[serde(rename = "SatisfactionRating")]
    pub satisfaction_rating: Option<i32>,
    /// Engagement level, observed values are "High", "Medium" and "Low"
    #[serde(rename = "EngagementLevel")]
    pub engagement_level: Option<String>,
    #[serde(rename = "ReportsConcerns")]
    pub reports_concerns: Option<bool>,
    #[serde(rename = "ProvidedSuggestions")]
    pub provided_suggestions: Option<bool>,
}

impl EmployeeRecord {
    /// Create a fully populated record with both boolean flags unset
    #[must_use]
    pub fn new(
        employee_id: i32,
        department: &str,
        job_title: &str,
        satisfaction_rating: i32,
        engagement_level: &str,
    ) -> Self {
        Self {
            employee_id: Some(employee_id),
            department: Some(department.to_string()),
            job_title: Some(job_title.to_string()),
            satisfaction_rating: Some(satisfaction_rating),
            engagement_level: Some(engagement_level.to_string()),
            reports_concerns: Some(false),
            provided_suggestions: Some(false),
        }
    }

    /// Set the two survey flags
    #[must_use]
    pub fn with_flags(mut self, reports_concerns: bool, provided_suggestions: bool) -> Self {
        self.reports_concerns = Some(reports_concerns);
        self.provided_suggestions = Some(provided_suggestions);
        self
    }
}

impl ArrowSchema for EmployeeRecord {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new(columns::EMPLOYEE_ID, DataType::Int32, true),
            Field::new(columns::DEPARTMENT, DataType::Utf8, true),
            Field::new(columns::JOB_TITLE, DataType::Utf8, true),
            Field::new(columns::SATISFACTION_RATING, DataType::Int32, true),
            Field::new(columns::ENGAGEMENT_LEVEL, DataType::Utf8, true),
            Field::new(columns::REPORTS_CONCERNS, DataType::Boolean, true),
            Field::new(columns::PROVIDED_SUGGESTIONS, DataType::Boolean, true),
        ])
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }

    fn to_record_batch(records: &[Self]) -> Result<RecordBatch> {
        Ok(serde_arrow::to_record_batch(&Self::fields(), &records)?)
    }
}
