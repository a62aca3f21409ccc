//! Statistical type inference for frame columns.

use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use hipp_common::{any_is_missing, any_to_bool, any_to_f64};
use hipp_model::VariableType;

/// Share of non-missing values that must parse as numbers for a column to
/// be numerical. The comparison is strict.
pub const NUMERIC_SHARE_THRESHOLD: f64 = 0.8;

/// Classifies a column as boolean, numerical or categorical.
///
/// A column is boolean when its dtype is boolean or every non-missing value
/// is a `true`/`false` token; a column with no values at all is also
/// boolean. Numeric `0`/`1` columns are numerical, not boolean.
pub fn infer_column(column: &Column) -> VariableType {
    if column.dtype() == &DataType::Boolean {
        return VariableType::Boolean;
    }
    let mut present = 0usize;
    let mut boolean = 0usize;
    let mut numeric = 0usize;
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if any_is_missing(&value) {
            continue;
        }
        present += 1;
        if any_to_bool(value.clone()).is_some() {
            boolean += 1;
        } else if any_to_f64(value).is_some() {
            numeric += 1;
        }
    }
    if boolean == present {
        return VariableType::Boolean;
    }
    if numeric as f64 / present as f64 > NUMERIC_SHARE_THRESHOLD {
        return VariableType::Numerical;
    }
    VariableType::Categorical
}

/// Infers the type of a named column; `None` when the column is absent.
pub fn infer(df: &DataFrame, name: &str) -> Option<VariableType> {
    df.column(name).ok().map(infer_column)
}
