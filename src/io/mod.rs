//! Reading employee tables and writing classification results
//!
//! Employee data may come from delimited text or Parquet files, or from a
//! directory holding any mix of the two. Every batch leaving this module has
//! been conformed to the employee schema.

pub mod async_reader;
pub mod reader;
pub mod writer;

pub use async_reader::{read_employee_parquet_async, read_employees_async};
pub use reader::{
    InputFormat, find_employee_files, read_employee_csv, read_employee_parquet, read_employees,
    read_results_csv,
};
pub use writer::{write_employees_csv, write_results, write_results_csv, write_results_json};
