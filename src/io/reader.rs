//! Synchronous readers for employee tables
//!
//! Delimited text is read by header name, so columns may appear in any order
//! and unknown columns are ignored. Parquet files are projected onto the
//! employee columns they contain.

use std::fs::{self, File};
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::schema::types::SchemaDescriptor;
use rayon::prelude::*;

use crate::config::ReaderConfig;
use crate::error::util::{safe_open_file, validate_directory};
use crate::error::{EngagementError, Result};
use crate::models::{ArrowSchema, DepartmentResult, columns};
use crate::schema::{check_employee_schema, conform_batch, employee_schema_ref};
use crate::utils::logging::progress::{create_file_progress_bar, finish_progress_bar};
use crate::utils::{log_operation_complete, log_operation_start, log_warning};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    /// Detect the format from the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Read employee records from a file or a directory of files
///
/// A directory is read as the union of every supported file directly inside
/// it; files are read in parallel.
pub fn read_employees(path: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    if path.is_dir() {
        return read_employee_directory(path, config);
    }

    match InputFormat::from_path(path) {
        Some(InputFormat::Csv) => read_employee_csv(path, config),
        Some(InputFormat::Parquet) => read_employee_parquet(path, config),
        None => Err(unsupported_input(path)),
    }
}

/// Read a delimited text file of employee records
///
/// Empty fields become nulls. A value that does not parse as its column type
/// fails the whole read with an error naming the file.
pub fn read_employee_csv(path: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading employee CSV", path);

    let mut file = safe_open_file(path, "employee CSV input")?;
    let source_schema = csv_source_schema(&mut file, path, config)?;
    ensure_employee_columns(&source_schema, path)?;
    file.rewind().map_err(|e| EngagementError::io_at(path, e))?;

    let reader = ReaderBuilder::new(Arc::new(source_schema))
        .with_header(config.has_header)
        .with_delimiter(config.delimiter)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader
        .map(|batch| {
            let batch = batch.map_err(|e| EngagementError::invalid_data(path, e.to_string()))?;
            conform_batch(&batch)
        })
        .collect::<Result<Vec<_>>>()?;

    log_operation_complete("read", path, total_rows(&batches), "rows", Some(start.elapsed()));
    Ok(batches)
}

/// Read a Parquet file of employee records
pub fn read_employee_parquet(path: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading employee Parquet", path);

    let file = safe_open_file(path, "employee Parquet input")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    ensure_employee_columns(builder.schema(), path)?;

    let projection = employee_projection(builder.schema(), builder.parquet_schema());
    let reader = builder
        .with_projection(projection)
        .with_batch_size(config.batch_size)
        .build()?;

    let batches = reader
        .map(|batch| conform_batch(&batch?))
        .collect::<Result<Vec<_>>>()?;

    log_operation_complete("read", path, total_rows(&batches), "rows", Some(start.elapsed()));
    Ok(batches)
}

/// Find the supported employee files directly inside a directory, sorted by path
pub fn find_employee_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for employee files in", dir);
    validate_directory(dir, "employee input")?;

    let files = fs::read_dir(dir)
        .map_err(|e| EngagementError::io_at(dir, e))?
        .map(|entry| {
            entry
                .map(|entry| entry.path())
                .map_err(|e| EngagementError::io_at(dir, e))
        })
        .filter_ok(|path| path.is_file() && InputFormat::from_path(path).is_some())
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if files.is_empty() {
        log_warning("No employee files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), "employee files", None);
    }

    Ok(files)
}

/// Read every employee file in a directory in parallel
fn read_employee_directory(dir: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    let files = find_employee_files(dir)?;
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelism)
        .build()
        .map_err(|e| EngagementError::config(format!("failed to build reader pool: {e}")))?;

    let pb = create_file_progress_bar(files.len() as u64, Some("reading employee files"));
    let results = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let batches = read_employees(path, config);
                pb.inc(1);
                batches
            })
            .collect::<Result<Vec<Vec<RecordBatch>>>>()
    });
    finish_progress_bar(&pb, Some("employee files read"));

    let batches = results?.into_iter().flatten().collect_vec();
    log::info!(
        "Loaded {} batches ({} rows) from {} files",
        batches.len(),
        total_rows(&batches),
        files.len()
    );

    Ok(batches)
}

/// Read a results file written by [`crate::io::write_results_csv`]
pub fn read_results_csv(path: &Path) -> Result<Vec<DepartmentResult>> {
    let file = safe_open_file(path, "classification results")?;
    let reader = ReaderBuilder::new(DepartmentResult::schema_ref())
        .with_header(true)
        .build(file)?;

    let mut results = Vec::new();
    for batch in reader {
        results.extend(DepartmentResult::from_record_batch(&batch?)?);
    }
    Ok(results)
}

/// Schema used to parse a delimited file
///
/// Columns the classifier reads get their employee type. Everything else is
/// read as text: the other employee columns are cast leniently by
/// [`conform_batch`] and unknown columns are dropped. Without a header the
/// columns are taken to be in employee schema order.
fn csv_source_schema(file: &mut File, path: &Path, config: &ReaderConfig) -> Result<Schema> {
    let employee = employee_schema_ref();
    if !config.has_header {
        let fields = employee
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), csv_read_type(&employee, field.name()), true))
            .collect_vec();
        return Ok(Schema::new(fields));
    }

    let (header, _) = Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter)
        .infer_schema(&mut *file, Some(0))
        .map_err(|e| EngagementError::invalid_data(path, e.to_string()))?;

    let fields = header
        .fields()
        .iter()
        .map(|field| Field::new(field.name(), csv_read_type(&employee, field.name()), true))
        .collect_vec();

    Ok(Schema::new(fields))
}

fn csv_read_type(employee: &Schema, name: &str) -> DataType {
    if !columns::CLASSIFIER_COLUMNS.contains(&name) {
        return DataType::Utf8;
    }
    employee
        .field_with_name(name)
        .map_or(DataType::Utf8, |known| known.data_type().clone())
}

/// Fail early when a source lacks a column the classifier needs
pub(crate) fn ensure_employee_columns(schema: &Schema, path: &Path) -> Result<()> {
    let report = check_employee_schema(schema);
    if report.compatible {
        return Ok(());
    }

    let details = report
        .issues
        .iter()
        .map(|issue| format!("{}: {}", issue.column, issue.description))
        .join("; ");
    Err(EngagementError::schema(format!(
        "{} does not match the employee schema ({details})",
        path.display()
    )))
}

/// Projection selecting the employee columns present in a Parquet file
pub(crate) fn employee_projection(
    file_schema: &Schema,
    parquet_schema: &SchemaDescriptor,
) -> ProjectionMask {
    let employee = employee_schema_ref();
    let indices = file_schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| employee.field_with_name(field.name()).is_ok())
        .map(|(index, _)| index)
        .collect_vec();

    ProjectionMask::roots(parquet_schema, indices)
}

pub(crate) fn unsupported_input(path: &Path) -> EngagementError {
    EngagementError::config(format!(
        "unsupported input file {}, expected .csv or .parquet",
        path.display()
    ))
}

pub(crate) fn total_rows(batches: &[RecordBatch]) -> usize {
    batches.iter().map(RecordBatch::num_rows).sum()
}
