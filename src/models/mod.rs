//! Domain models for employee survey analysis
//!
//! Input rows ([`EmployeeRecord`]) and output rows ([`DepartmentResult`]),
//! each with a fixed Arrow schema.

pub mod department;
pub mod employee;
pub mod traits;

pub use department::DepartmentResult;
pub use employee::{EmployeeRecord, columns};
pub use traits::ArrowSchema;
