//! Writers for classification results
//!
//! Each writer produces one consolidated file, replacing anything already at
//! the path and creating missing parent directories.

use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::util::safe_create_file;
use crate::error::{EngagementError, Result};
use crate::models::{ArrowSchema, DepartmentResult};
use crate::schema::employee_schema_ref;
use crate::utils::{log_operation_complete, log_operation_start};

/// Write results in the configured format
pub fn write_results(results: &[DepartmentResult], output: &OutputConfig) -> Result<()> {
    match output.format {
        OutputFormat::Csv => write_results_csv(results, &output.path),
        OutputFormat::Json => write_results_json(results, &output.path),
    }
}

/// Write results as `Department,HighSatisfactionPercentage` with a header row
///
/// The header is written even when there are no results.
pub fn write_results_csv(results: &[DepartmentResult], path: &Path) -> Result<()> {
    log_operation_start("Writing results CSV to", path);

    let batch = DepartmentResult::to_record_batch(results)?;
    write_csv(&[batch], path, "classification results")?;

    log_operation_complete("wrote", path, results.len(), "departments", None);
    Ok(())
}

/// Write results as a JSON array of objects
pub fn write_results_json(results: &[DepartmentResult], path: &Path) -> Result<()> {
    log_operation_start("Writing results JSON to", path);

    let file = safe_create_file(path, "classification results")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer
        .flush()
        .map_err(|e| EngagementError::io_at(path, e))?;

    log_operation_complete("wrote", path, results.len(), "departments", None);
    Ok(())
}

/// Write employee batches as delimited text with a header row
///
/// With no batches the file still gets the employee header.
pub fn write_employees_csv(batches: &[RecordBatch], path: &Path) -> Result<()> {
    log_operation_start("Writing employee CSV to", path);
    if batches.is_empty() {
        let empty = RecordBatch::new_empty(employee_schema_ref());
        write_csv(&[empty], path, "employee data")?;
    } else {
        write_csv(batches, path, "employee data")?;
    }
    log_operation_complete(
        "wrote",
        path,
        batches.iter().map(RecordBatch::num_rows).sum(),
        "rows",
        None,
    );
    Ok(())
}

fn write_csv(batches: &[RecordBatch], path: &Path, purpose: &str) -> Result<()> {
    let file = safe_create_file(path, purpose)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    for batch in batches {
        writer.write(batch)?;
    }
    Ok(())
}
