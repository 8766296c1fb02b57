//! Department classifier
//!
//! The pipeline is the group-by formulation of the question "which
//! departments have enough satisfied, engaged employees":
//!
//! 1. filter the qualifying employees with [`qualification_expr`]
//! 2. count employees per department, over all rows and over qualifying rows
//! 3. left-join the two counts, missing qualifying counts become zero
//! 4. compute the rounded percentage and keep departments strictly above the
//!    threshold
//!
//! Counting uses `count(EmployeeID)`: rows without an employee id are not
//! counted, and rows without a department are not grouped at all.

use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithm::classification::statistics::{
    ClassificationSummary, DepartmentStats, DepartmentTally,
};
use crate::config::ClassifierConfig;
use crate::error::{EngagementError, Result};
use crate::filter::{BatchFilter, Expr, ExpressionFilter, LiteralValue, in_filter};
use crate::models::{ArrowSchema, DepartmentResult, EmployeeRecord, columns};
use crate::schema::conform_batch;

/// Build the expression selecting qualifying employees
///
/// `SatisfactionRating >= min_rating AND EngagementLevel IN (levels)`; the
/// rating bound applies to every qualifying level.
#[must_use]
pub fn qualification_expr(config: &ClassifierConfig) -> Expr {
    Expr::And(vec![
        Expr::GtEq(
            columns::SATISFACTION_RATING.to_string(),
            LiteralValue::Int(config.min_rating),
        ),
        in_filter(
            columns::ENGAGEMENT_LEVEL,
            config
                .qualifying_levels
                .iter()
                .map(|level| LiteralValue::String(level.clone()))
                .collect(),
        ),
    ])
}

/// Classifies departments by their share of qualifying employees
#[derive(Debug, Clone)]
pub struct DepartmentClassifier {
    config: ClassifierConfig,
    qualification: Arc<dyn BatchFilter + Send + Sync>,
}

impl Default for DepartmentClassifier {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        Self {
            qualification: Arc::new(ExpressionFilter::new(qualification_expr(&config))),
            config,
        }
    }
}

impl DepartmentClassifier {
    /// Create a classifier for the given policy
    ///
    /// # Errors
    /// Returns a configuration error if the threshold is not finite
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            qualification: Arc::new(ExpressionFilter::new(qualification_expr(&config))),
            config,
        })
    }

    /// Replace the qualification predicate
    ///
    /// The threshold from the configuration still applies.
    #[must_use]
    pub fn with_qualification_filter(mut self, filter: Arc<dyn BatchFilter + Send + Sync>) -> Self {
        self.qualification = filter;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Count total and qualifying employees per department in one batch
    ///
    /// # Errors
    /// Returns an error if the batch cannot be conformed to the employee
    /// schema or the qualification filter fails
    pub fn tally_batch(&self, batch: &RecordBatch) -> Result<DepartmentTally> {
        let batch = conform_batch(batch)?;
        let qualifying_batch = self.qualification.filter(&batch)?;

        let (totals, null_departments) = count_by_department(&batch)?;
        let (qualifying, _) = count_by_department(&qualifying_batch)?;

        log::debug!(
            "Tallied batch of {} rows: {} departments, {} qualifying rows",
            batch.num_rows(),
            totals.len(),
            qualifying_batch.num_rows()
        );

        Ok(DepartmentTally::new(
            totals,
            qualifying,
            batch.num_rows(),
            null_departments,
        ))
    }

    /// Tally every batch in parallel and merge the results
    ///
    /// # Errors
    /// Returns the first error raised while tallying a batch
    pub fn tally_batches(&self, batches: &[RecordBatch]) -> Result<DepartmentTally> {
        batches
            .par_iter()
            .map(|batch| self.tally_batch(batch))
            .try_reduce(DepartmentTally::default, |a, b| Ok(a.merge(b)))
    }

    /// Joined counts and percentage for every department in the input
    pub fn department_stats(&self, batches: &[RecordBatch]) -> Result<Vec<DepartmentStats>> {
        Ok(self.tally_batches(batches)?.stats())
    }

    /// Departments above the threshold, sorted by name, with run counts
    pub fn classify_with_summary(
        &self,
        batches: &[RecordBatch],
    ) -> Result<(Vec<DepartmentResult>, ClassificationSummary)> {
        let tally = self.tally_batches(batches)?;
        let stats = tally.stats();

        let results: Vec<DepartmentResult> = stats
            .iter()
            .filter(|stats| stats.exceeds(self.config.threshold))
            .filter_map(DepartmentStats::to_result)
            .collect();

        let summary = ClassificationSummary {
            records: tally.records(),
            departments: tally.department_count(),
            retained: results.len(),
            null_departments: tally.null_departments(),
            threshold: self.config.threshold,
        };

        if summary.null_departments > 0 {
            log::debug!(
                "Skipped {} rows without a department",
                summary.null_departments
            );
        }
        log::info!("Classification complete: {summary}");

        Ok((results, summary))
    }

    /// Departments above the threshold, sorted by name
    pub fn classify(&self, batches: &[RecordBatch]) -> Result<Vec<DepartmentResult>> {
        self.classify_with_summary(batches).map(|(results, _)| results)
    }

    /// Classify typed records
    pub fn classify_records(&self, records: &[EmployeeRecord]) -> Result<Vec<DepartmentResult>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let batch = EmployeeRecord::to_record_batch(records)?;
        self.classify(&[batch])
    }

    /// Classify and return the result as a `(Department, HighSatisfactionPercentage)` batch
    pub fn classify_to_batch(&self, batches: &[RecordBatch]) -> Result<RecordBatch> {
        DepartmentResult::to_record_batch(&self.classify(batches)?)
    }
}

/// Identify departments whose share of qualifying employees exceeds the
/// configured threshold
pub fn identify_departments_high_satisfaction(
    batches: &[RecordBatch],
    config: &ClassifierConfig,
) -> Result<Vec<DepartmentResult>> {
    DepartmentClassifier::new(config.clone())?.classify(batches)
}

/// `count(EmployeeID)` grouped by department
///
/// Returns the counts and the number of rows with a null department.
/// Departments whose rows all lack an employee id are present with count 0.
fn count_by_department(batch: &RecordBatch) -> Result<(FxHashMap<String, usize>, usize)> {
    let departments = batch
        .column_by_name(columns::DEPARTMENT)
        .and_then(|column| column.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| {
            EngagementError::schema(format!("{} must be a string column", columns::DEPARTMENT))
        })?;
    let employee_ids = batch.column_by_name(columns::EMPLOYEE_ID).ok_or_else(|| {
        EngagementError::schema(format!("{} column not found", columns::EMPLOYEE_ID))
    })?;

    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    let mut null_departments = 0;

    for row in 0..batch.num_rows() {
        if departments.is_null(row) {
            null_departments += 1;
            continue;
        }

        let counted = usize::from(employee_ids.is_valid(row));
        let department = departments.value(row);
        match counts.get_mut(department) {
            Some(count) => *count += counted,
            None => {
                counts.insert(department.to_string(), counted);
            }
        }
    }

    Ok((counts, null_departments))
}
