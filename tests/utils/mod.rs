use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use engagement_reader::models::ArrowSchema;
use engagement_reader::{EmployeeRecord, Result};
use parquet::arrow::ArrowWriter;

/// Shorthand for a complete employee record
#[must_use]
pub fn employee(id: i32, department: &str, rating: i32, level: &str) -> EmployeeRecord {
    EmployeeRecord::new(id, department, "Analyst", rating, level)
}

/// Records as a single batch
pub fn batch_of(records: &[EmployeeRecord]) -> Result<RecordBatch> {
    EmployeeRecord::to_record_batch(records)
}

/// Write batches to a Parquet file
pub fn write_parquet(path: &Path, batches: &[RecordBatch]) -> PathBuf {
    let file = File::create(path).expect("create parquet file");
    let schema = batches[0].schema();
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
    for batch in batches {
        writer.write(batch).expect("write parquet batch");
    }
    writer.close().expect("close parquet writer");
    path.to_path_buf()
}

/// Write raw CSV text
pub fn write_text(path: &Path, contents: &str) -> PathBuf {
    std::fs::write(path, contents).expect("write csv file");
    path.to_path_buf()
}
