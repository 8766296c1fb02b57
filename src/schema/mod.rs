//! Schema compatibility checks for employee data
//!
//! Sources are free to deliver wider integer types, large strings or
//! string-encoded values; [`conform_batch`] adapts every batch to the
//! employee schema before the classifier reads it.

pub mod compatibility;
pub mod conform;

use arrow::datatypes::{DataType, Schema};

pub use compatibility::{TypeCompatibility, check_type_compatibility};
pub use conform::{conform_batch, employee_schema_ref};

use crate::models::{ArrowSchema, EmployeeRecord, columns};

/// The result of checking a source schema against the employee schema
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether the source can be conformed to the employee schema
    pub compatible: bool,
    /// Problems that prevent conforming
    pub issues: Vec<SchemaIssue>,
    /// Columns that need a cast, as (column, source type)
    pub adaptations: Vec<(String, DataType)>,
    /// Optional columns absent from the source that will be null-filled
    pub missing_optional: Vec<String>,
}

/// A schema compatibility issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Column the issue concerns
    pub column: String,
    /// Description of the incompatibility
    pub description: String,
}

/// Check a source schema against the employee schema
#[must_use]
pub fn check_employee_schema(source: &Schema) -> SchemaCompatibilityReport {
    let mut report = SchemaCompatibilityReport::default();

    for target_field in EmployeeRecord::schema().fields() {
        let name = target_field.name();
        match source.field_with_name(name) {
            Ok(source_field) => {
                match check_type_compatibility(source_field.data_type(), target_field.data_type()) {
                    TypeCompatibility::Exact => {}
                    TypeCompatibility::Compatible => report
                        .adaptations
                        .push((name.clone(), source_field.data_type().clone())),
                    TypeCompatibility::Incompatible => report.issues.push(SchemaIssue {
                        column: name.clone(),
                        description: format!(
                            "{:?} cannot be converted to {:?}",
                            source_field.data_type(),
                            target_field.data_type()
                        ),
                    }),
                }
            }
            Err(_) if columns::CLASSIFIER_COLUMNS.contains(&name.as_str()) => {
                report.issues.push(SchemaIssue {
                    column: name.clone(),
                    description: "required column is missing".to_string(),
                });
            }
            Err(_) => report.missing_optional.push(name.clone()),
        }
    }

    report.compatible = report.issues.is_empty();
    report
}
