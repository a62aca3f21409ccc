//! Complete-case rows for one (variable, trait) pair.

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray, PolarsResult};

use hipp_common::{any_is_missing, any_to_bool, any_to_f64, any_to_string};
use hipp_core::{AnalysisFrame, FieldDescriptor};

/// Rows of the trait, the variable and the controls with no missing value.
///
/// The trait column must also coerce to a number; anything else counts as
/// missing. Controls equal to the trait or the variable are dropped.
#[derive(Debug, Clone)]
pub struct PairData<'a> {
    trait_field: &'a FieldDescriptor,
    variable: &'a FieldDescriptor,
    controls: Vec<&'a FieldDescriptor>,
    rows: DataFrame,
}

impl<'a> PairData<'a> {
    pub fn extract(
        frame: &AnalysisFrame,
        trait_field: &'a FieldDescriptor,
        variable: &'a FieldDescriptor,
        controls: &[&'a FieldDescriptor],
    ) -> PolarsResult<Self> {
        let mut kept: Vec<&'a FieldDescriptor> = Vec::new();
        for &control in controls {
            let duplicate = control.name == trait_field.name
                || control.name == variable.name
                || kept.iter().any(|field| field.name == control.name);
            if !duplicate {
                kept.push(control);
            }
        }

        let mut names = vec![trait_field.name.clone()];
        if variable.name != trait_field.name {
            names.push(variable.name.clone());
        }
        names.extend(kept.iter().map(|field| field.name.clone()));
        let selected = frame.data().select(names)?;

        let outcome = selected.column(&trait_field.name)?;
        let predictors: Vec<&Column> = selected
            .get_columns()
            .iter()
            .filter(|column| column.name().as_str() != trait_field.name)
            .collect();
        let mask: Vec<bool> = (0..selected.height())
            .map(|idx| {
                any_to_f64(outcome.get(idx).unwrap_or(AnyValue::Null)).is_some()
                    && predictors
                        .iter()
                        .all(|column| !any_is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
            })
            .collect();
        let mask = BooleanChunked::from_slice("complete".into(), &mask);
        let rows = selected.filter(&mask)?;

        Ok(Self {
            trait_field,
            variable,
            controls: kept,
            rows,
        })
    }

    pub fn trait_field(&self) -> &'a FieldDescriptor {
        self.trait_field
    }

    pub fn trait_name(&self) -> &'a str {
        &self.trait_field.name
    }

    pub fn variable(&self) -> &'a FieldDescriptor {
        self.variable
    }

    pub fn controls(&self) -> &[&'a FieldDescriptor] {
        &self.controls
    }

    /// Complete-case row count.
    pub fn height(&self) -> usize {
        self.rows.height()
    }

    pub fn rows(&self) -> &DataFrame {
        &self.rows
    }

    /// Trait values; every row coerces by construction.
    pub fn outcome(&self) -> Vec<f64> {
        self.numbers(&self.trait_field.name)
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect()
    }

    /// Numeric coercion of a column, `None` where a value does not parse.
    pub fn numbers(&self, name: &str) -> Vec<Option<f64>> {
        self.values(name, any_to_f64)
    }

    /// `1.0`/`0.0` for boolean tokens, numeric coercion otherwise.
    pub fn indicators(&self, name: &str) -> Vec<Option<f64>> {
        self.values(name, |value| match any_to_bool(value.clone()) {
            Some(flag) => Some(if flag { 1.0 } else { 0.0 }),
            None => any_to_f64(value),
        })
    }

    /// Trimmed text of a column, used as group or level labels.
    pub fn labels(&self, name: &str) -> Vec<String> {
        self.values(name, any_to_string)
    }

    fn values<T>(&self, name: &str, convert: impl Fn(AnyValue<'_>) -> T) -> Vec<T> {
        match self.rows.column(name) {
            Ok(column) => (0..column.len())
                .map(|idx| convert(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
