//! Data type compatibility between source columns and the employee schema

use arrow::datatypes::DataType;

/// Types of data type compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCompatibility {
    /// Types match exactly
    Exact,
    /// Types can be converted with a cast
    Compatible,
    /// Types are incompatible
    Incompatible,
}

/// Check if a source type can be adapted to a target type
#[must_use]
pub fn check_type_compatibility(from: &DataType, to: &DataType) -> TypeCompatibility {
    if from == to {
        return TypeCompatibility::Exact;
    }

    match (from, to) {
        // All-null columns take any type
        (DataType::Null, _) => TypeCompatibility::Compatible,

        (f, t) if f.is_integer() && t.is_integer() => TypeCompatibility::Compatible,

        // String-encoded values are parsed during the cast
        (f, t) if is_string(f) && (t.is_integer() || is_string(t) || *t == DataType::Boolean) => {
            TypeCompatibility::Compatible
        }

        (f, t) if (f.is_integer() || *f == DataType::Boolean) && is_string(t) => {
            TypeCompatibility::Compatible
        }

        (DataType::Dictionary(_, value), t) if is_string(value) && is_string(t) => {
            TypeCompatibility::Compatible
        }

        _ => TypeCompatibility::Incompatible,
    }
}

/// Check if a data type is a string type
#[must_use]
pub fn is_string(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}
