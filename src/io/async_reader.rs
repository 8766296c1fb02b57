//! Async loading of employee tables on tokio
//!
//! Parquet files are streamed with the async Parquet reader. Delimited text
//! is parsed on the blocking pool. Directories are read with at most
//! `ReaderConfig::parallelism` files in flight.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;
use tokio::fs;

use crate::config::ReaderConfig;
use crate::error::{EngagementError, Result};
use crate::io::reader::{
    InputFormat, employee_projection, ensure_employee_columns, read_employee_csv, total_rows,
    unsupported_input,
};
use crate::schema::conform_batch;
use crate::utils::{log_operation_complete, log_operation_start, log_warning};

/// Read employee records from a file or directory without blocking the runtime
pub async fn read_employees_async(path: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| EngagementError::io_at(path, e))?;

    if metadata.is_dir() {
        read_directory_async(path, config).await
    } else {
        read_file_async(path.to_path_buf(), config.clone()).await
    }
}

/// Stream a Parquet file of employee records
pub async fn read_employee_parquet_async(
    path: &Path,
    config: &ReaderConfig,
) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading employee Parquet asynchronously", path);

    let file = fs::File::open(path)
        .await
        .map_err(|e| EngagementError::io_at(path, e))?;
    let builder = ParquetRecordBatchStreamBuilder::new(file).await?;
    ensure_employee_columns(builder.schema(), path)?;

    let projection = employee_projection(builder.schema(), builder.parquet_schema());
    let stream = builder
        .with_projection(projection)
        .with_batch_size(config.batch_size)
        .build()?;

    let batches = stream
        .try_collect::<Vec<_>>()
        .await?
        .iter()
        .map(conform_batch)
        .collect::<Result<Vec<_>>>()?;

    log_operation_complete("read", path, total_rows(&batches), "rows", Some(start.elapsed()));
    Ok(batches)
}

async fn read_file_async(path: PathBuf, config: ReaderConfig) -> Result<Vec<RecordBatch>> {
    match InputFormat::from_path(&path) {
        Some(InputFormat::Parquet) => read_employee_parquet_async(&path, &config).await,
        Some(InputFormat::Csv) => {
            tokio::task::spawn_blocking(move || read_employee_csv(&path, &config))
                .await
                .map_err(|e| EngagementError::Io(io::Error::other(e)))?
        }
        None => Err(unsupported_input(&path)),
    }
}

async fn find_employee_files_async(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for employee files asynchronously in", dir);

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| EngagementError::io_at(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| EngagementError::io_at(dir, e))?
    {
        let path = entry.path();
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| EngagementError::io_at(&path, e))?;

        if metadata.is_file() && InputFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        log_warning("No employee files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), "employee files", None);
    }

    Ok(files)
}

async fn read_directory_async(dir: &Path, config: &ReaderConfig) -> Result<Vec<RecordBatch>> {
    let files = find_employee_files_async(dir).await?;
    if files.is_empty() {
        return Ok(Vec::new());
    }
    let file_count = files.len();

    let results = stream::iter(files)
        .map(|path| read_file_async(path, config.clone()))
        .buffer_unordered(config.parallelism)
        .collect::<Vec<_>>()
        .await;

    let batches = results
        .into_iter()
        .map(|result| {
            result.inspect_err(|e| log::error!("Error loading employee file: {e}"))
        })
        .collect::<Result<Vec<Vec<RecordBatch>>>>()?
        .into_iter()
        .flatten()
        .collect_vec();

    log::info!(
        "Loaded {} batches ({} rows) from {} files",
        batches.len(),
        total_rows(&batches),
        file_count
    );

    Ok(batches)
}
