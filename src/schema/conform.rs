//! Conform record batches to the employee schema

use std::sync::{Arc, OnceLock};

use arrow::array::{ArrayRef, new_null_array};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::error::{EngagementError, Result};
use crate::models::{ArrowSchema, EmployeeRecord, columns};
use crate::schema::check_employee_schema;

/// Shared reference to the employee schema
#[must_use]
pub fn employee_schema_ref() -> SchemaRef {
    static SCHEMA: OnceLock<SchemaRef> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(EmployeeRecord::schema_ref))
}

/// Adapt a batch to the employee schema
///
/// Columns are matched by name and cast to the employee types. In the
/// columns the classifier reads, values that do not survive the cast (for
/// example a rating of `"five"`) are errors, not nulls. In the remaining
/// columns they become null. Optional columns missing from the source are
/// filled with nulls.
///
/// # Errors
/// Returns a schema error if a required column is missing or has an
/// incompatible type, and an Arrow error if a value cannot be cast
pub fn conform_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let target = employee_schema_ref();
    if batch.schema().fields() == target.fields() {
        return Ok(batch.clone());
    }

    let report = check_employee_schema(&batch.schema());
    if !report.compatible {
        let details = report
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.column, issue.description))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(EngagementError::schema(format!(
            "batch does not match the employee schema ({details})"
        )));
    }

    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };
    let lenient = CastOptions::default();

    let columns = target
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Ok(Arc::clone(column)),
            Some(column) => {
                let options = if columns::CLASSIFIER_COLUMNS.contains(&field.name().as_str()) {
                    &strict
                } else {
                    &lenient
                };
                cast_with_options(column, field.data_type(), options).map_err(|e| {
                    EngagementError::schema(format!("column {}: {e}", field.name()))
                })
            }
            None => Ok(new_null_array(field.data_type(), batch.num_rows())),
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(target, columns)?)
}
