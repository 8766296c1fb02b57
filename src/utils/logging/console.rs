//! Console output utilities
//!
//! Formatted tables for classification results.

use std::fmt::Write;
use std::time::Duration;

use arrow::record_batch::RecordBatch;

use crate::algorithm::classification::{ClassificationSummary, DepartmentStats};
use crate::models::DepartmentResult;
use crate::models::department::{DEPARTMENT_COLUMN, PERCENTAGE_COLUMN};

/// Render results as an aligned two-column table
#[must_use]
pub fn format_results_table(results: &[DepartmentResult]) -> String {
    let width = results
        .iter()
        .map(|result| result.department.len())
        .max()
        .unwrap_or(0)
        .max(DEPARTMENT_COLUMN.len());

    let mut table = String::new();
    let _ = writeln!(table, "{DEPARTMENT_COLUMN:<width$}  {PERCENTAGE_COLUMN}");
    for result in results {
        let _ = writeln!(
            table,
            "{:<width$}  {:.2}",
            result.department, result.high_satisfaction_percentage
        );
    }
    table
}

/// Print the departments that passed the threshold
pub fn print_results(results: &[DepartmentResult]) {
    if results.is_empty() {
        println!("No departments above the threshold");
        return;
    }
    print!("{}", format_results_table(results));
}

/// Print every department with its counts, including those below the threshold
pub fn print_department_stats(stats: &[DepartmentStats]) {
    println!("{:<24} {:>8} {:>10} {:>8}", "Department", "Total", "Qualifying", "Percent");
    for department in stats {
        let percentage = department
            .high_satisfaction_percentage
            .map_or_else(|| "-".to_string(), |p| format!("{p:.2}"));
        println!(
            "{:<24} {:>8} {:>10} {:>8}",
            department.department,
            department.total_employees,
            department.high_satisfaction_count,
            percentage
        );
    }
}

/// Print summary information about a run
pub fn print_summary(batches: &[RecordBatch], summary: &ClassificationSummary, elapsed: Duration) {
    println!(
        "Read {} record batches ({} rows) in {:?}",
        batches.len(),
        batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
        elapsed
    );
    println!("{summary}");
}
