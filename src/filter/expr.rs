//! Expression-based filtering
//!
//! Expressions are evaluated column-at-a-time with Arrow comparison kernels.
//! Evaluation uses three-valued logic: a comparison against a null cell is
//! null, `AND`/`OR` follow Kleene semantics, and only the final mask maps
//! null to false. A row therefore never passes a filter because of a missing
//! value.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, Scalar, StringArray,
};
use arrow::compute::kernels::cmp;
use arrow::compute::{and_kleene, cast, is_not_null, is_null, not, or_kleene, prep_null_mask_filter};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::BatchFilter;
use crate::filter::error::{FilterResultExt, column_not_found, column_type_error};

/// Represents a filter expression over named columns
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column not equals a literal value
    NotEq(String, LiteralValue),

    /// Column is greater than a literal value
    Gt(String, LiteralValue),

    /// Column is greater than or equal to a literal value
    GtEq(String, LiteralValue),

    /// Column is less than a literal value
    Lt(String, LiteralValue),

    /// Column is less than or equal to a literal value
    LtEq(String, LiteralValue),

    /// Column is in a set of values
    In(String, Vec<LiteralValue>),

    /// Column is not in a set of values
    NotIn(String, Vec<LiteralValue>),

    /// Column is null
    IsNull(String),

    /// Column is not null
    IsNotNull(String),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Logical OR of expressions
    Or(Vec<Expr>),

    /// Logical NOT of an expression
    Not(Box<Expr>),

    /// Always evaluates to true
    AlwaysTrue,

    /// Always evaluates to false
    AlwaysFalse,
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::Eq(col, _)
            | Self::NotEq(col, _)
            | Self::Gt(col, _)
            | Self::GtEq(col, _)
            | Self::Lt(col, _)
            | Self::LtEq(col, _)
            | Self::In(col, _)
            | Self::NotIn(col, _)
            | Self::IsNull(col)
            | Self::IsNotNull(col) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) | Self::Or(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
            Self::Not(expr) => expr.collect_required_columns(columns),
            Self::AlwaysTrue | Self::AlwaysFalse => {}
        }
    }
}

/// A filter that evaluates an expression against a record batch
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the expression, keeping nulls where the outcome is unknown
    ///
    /// # Errors
    /// Returns an error if a referenced column is missing or has a type the
    /// literal cannot be compared with
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        self.evaluate_expr(batch, &self.expr)
    }

    fn evaluate_expr(&self, batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
        match expr {
            Expr::AlwaysTrue => Ok(BooleanArray::from(vec![true; batch.num_rows()])),
            Expr::AlwaysFalse => Ok(BooleanArray::from(vec![false; batch.num_rows()])),
            Expr::And(exprs) => self.evaluate_and_expression(batch, exprs),
            Expr::Or(exprs) => self.evaluate_or_expression(batch, exprs),
            Expr::Not(inner) => {
                let mask = self.evaluate_expr(batch, inner)?;
                not(&mask).with_expr_context(expr)
            }
            Expr::Eq(col, value) => self.evaluate_comparison(batch, col, Comparison::Eq, value),
            Expr::NotEq(col, value) => {
                self.evaluate_comparison(batch, col, Comparison::NotEq, value)
            }
            Expr::Gt(col, value) => self.evaluate_comparison(batch, col, Comparison::Gt, value),
            Expr::GtEq(col, value) => {
                self.evaluate_comparison(batch, col, Comparison::GtEq, value)
            }
            Expr::Lt(col, value) => self.evaluate_comparison(batch, col, Comparison::Lt, value),
            Expr::LtEq(col, value) => {
                self.evaluate_comparison(batch, col, Comparison::LtEq, value)
            }
            Expr::In(col, values) => self.evaluate_in_expression(batch, col, values),
            Expr::NotIn(col, values) => {
                let in_result = self.evaluate_in_expression(batch, col, values)?;
                not(&in_result).with_expr_context(expr)
            }
            Expr::IsNull(col) => {
                let column = column_by_name(batch, col)?;
                is_null(column.as_ref()).with_expr_context(expr)
            }
            Expr::IsNotNull(col) => {
                let column = column_by_name(batch, col)?;
                is_not_null(column.as_ref()).with_expr_context(expr)
            }
        }
    }

    fn evaluate_and_expression(&self, batch: &RecordBatch, exprs: &[Expr]) -> Result<BooleanArray> {
        let Some((first, rest)) = exprs.split_first() else {
            return Ok(BooleanArray::from(vec![true; batch.num_rows()]));
        };

        let mut result = self.evaluate_expr(batch, first)?;
        for expr in rest {
            let mask = self.evaluate_expr(batch, expr)?;
            result = and_kleene(&result, &mask).with_expr_context(expr)?;
        }
        Ok(result)
    }

    fn evaluate_or_expression(&self, batch: &RecordBatch, exprs: &[Expr]) -> Result<BooleanArray> {
        let Some((first, rest)) = exprs.split_first() else {
            return Ok(BooleanArray::from(vec![false; batch.num_rows()]));
        };

        let mut result = self.evaluate_expr(batch, first)?;
        for expr in rest {
            let mask = self.evaluate_expr(batch, expr)?;
            result = or_kleene(&result, &mask).with_expr_context(expr)?;
        }
        Ok(result)
    }

    /// `col IN (a, b, ...)` is `col = a OR col = b OR ...`
    fn evaluate_in_expression(
        &self,
        batch: &RecordBatch,
        col_name: &str,
        values: &[LiteralValue],
    ) -> Result<BooleanArray> {
        let alternatives: Vec<Expr> = values
            .iter()
            .map(|value| Expr::Eq(col_name.to_string(), value.clone()))
            .collect();

        // Missing columns must fail even when the value list is empty
        column_by_name(batch, col_name)?;
        self.evaluate_or_expression(batch, &alternatives)
    }

    fn evaluate_comparison(
        &self,
        batch: &RecordBatch,
        col_name: &str,
        op: Comparison,
        literal_value: &LiteralValue,
    ) -> Result<BooleanArray> {
        let column = column_by_name(batch, col_name)?;

        let Some((target_type, literal)) =
            literal_array(col_name, column.data_type(), literal_value)?
        else {
            // Comparing with NULL is unknown for every row
            return Ok(BooleanArray::new_null(batch.num_rows()));
        };

        let column = cast(&column, &target_type).with_expr_context(col_name)?;
        let literal = Scalar::new(literal);

        let result = match op {
            Comparison::Eq => cmp::eq(&column, &literal),
            Comparison::NotEq => cmp::neq(&column, &literal),
            Comparison::Gt => cmp::gt(&column, &literal),
            Comparison::GtEq => cmp::gt_eq(&column, &literal),
            Comparison::Lt => cmp::lt(&column, &literal),
            Comparison::LtEq => cmp::lt_eq(&column, &literal),
        };

        result.with_expr_context((op, col_name, literal_value))
    }
}

impl BatchFilter for ExpressionFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let mask = self.evaluate(batch)?;
        // prep_null_mask_filter requires a null buffer
        if mask.null_count() > 0 {
            Ok(prep_null_mask_filter(&mask))
        } else {
            Ok(mask)
        }
    }

    fn required_columns(&self) -> HashSet<String> {
        self.expr.required_columns()
    }
}

fn column_by_name(batch: &RecordBatch, col_name: &str) -> Result<ArrayRef> {
    match batch.column_by_name(col_name) {
        Some(column) => Ok(Arc::clone(column)),
        None => column_not_found(col_name),
    }
}

/// Build a one-element literal array and the type the column is cast to
fn literal_array(
    col_name: &str,
    column_type: &DataType,
    literal_value: &LiteralValue,
) -> Result<Option<(DataType, ArrayRef)>> {
    let is_string = matches!(
        column_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    );

    let literal: (DataType, ArrayRef) = match literal_value {
        LiteralValue::Null => return Ok(None),
        LiteralValue::Int(n) if column_type.is_integer() => {
            (DataType::Int64, Arc::new(Int64Array::from(vec![*n])))
        }
        #[allow(clippy::cast_precision_loss)]
        LiteralValue::Int(n) if column_type.is_floating() => {
            (DataType::Float64, Arc::new(Float64Array::from(vec![*n as f64])))
        }
        LiteralValue::Int(_) => return column_type_error(col_name, "numeric"),
        LiteralValue::Float(x) if column_type.is_numeric() => {
            (DataType::Float64, Arc::new(Float64Array::from(vec![*x])))
        }
        LiteralValue::Float(_) => return column_type_error(col_name, "numeric"),
        LiteralValue::String(s) if is_string => {
            (DataType::Utf8, Arc::new(StringArray::from(vec![s.as_str()])))
        }
        LiteralValue::String(_) => return column_type_error(col_name, "string"),
        LiteralValue::Boolean(b) if *column_type == DataType::Boolean => {
            (DataType::Boolean, Arc::new(BooleanArray::from(vec![*b])))
        }
        LiteralValue::Boolean(_) => return column_type_error(col_name, "boolean"),
    };

    Ok(Some(literal))
}

/// Equality filter for a column
#[must_use]
pub fn eq_filter(column: &str, value: LiteralValue) -> Expr {
    Expr::Eq(column.to_string(), value)
}

/// IN filter for a column
#[must_use]
pub fn in_filter(column: &str, values: Vec<LiteralValue>) -> Expr {
    Expr::In(column.to_string(), values)
}
