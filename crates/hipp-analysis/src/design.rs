//! Predictor encoding for linear regression.

use std::collections::BTreeSet;

use hipp_core::FieldDescriptor;
use hipp_model::VariableType;

use crate::pair::PairData;

/// Encoded regression inputs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Design {
    pub outcome: Vec<f64>,
    /// One entry per predictor column, each as long as `outcome`.
    pub columns: Vec<Vec<f64>>,
    /// First column encoding the variable of interest, if any.
    pub variable_column: Option<usize>,
}

impl Design {
    pub fn n_obs(&self) -> usize {
        self.outcome.len()
    }
}

enum Encoded {
    Numeric(Vec<Option<f64>>),
    Levels(Vec<String>),
}

fn encode_field(pair: &PairData<'_>, field: &FieldDescriptor) -> Encoded {
    match field.kind {
        VariableType::Numerical => Encoded::Numeric(pair.numbers(&field.name)),
        VariableType::Boolean => Encoded::Numeric(pair.indicators(&field.name)),
        VariableType::Categorical => Encoded::Levels(pair.labels(&field.name)),
    }
}

/// Builds the design for `trait ~ variable + controls`.
///
/// Numeric and boolean predictors keep their position; each categorical
/// predictor is replaced by one indicator per level except the first
/// (sorted) level, appended after the other columns. Rows where a numeric
/// predictor fails to coerce are dropped before levels are collected.
pub(crate) fn build(pair: &PairData<'_>) -> Design {
    let fields: Vec<&FieldDescriptor> = std::iter::once(pair.variable())
        .chain(pair.controls().iter().copied())
        .collect();
    let encoded: Vec<Encoded> = fields
        .iter()
        .map(|field| encode_field(pair, field))
        .collect();

    let outcome = pair.outcome();
    let keep: Vec<bool> = (0..outcome.len())
        .map(|row| {
            encoded.iter().all(|column| match column {
                Encoded::Numeric(values) => values[row].is_some(),
                Encoded::Levels(_) => true,
            })
        })
        .collect();
    let retain = |values: Vec<f64>| -> Vec<f64> {
        values
            .into_iter()
            .zip(&keep)
            .filter_map(|(value, &kept)| kept.then_some(value))
            .collect()
    };

    let mut columns = Vec::new();
    let mut variable_column = None;
    let mut categorical = Vec::new();
    for (position, column) in encoded.into_iter().enumerate() {
        match column {
            Encoded::Numeric(values) => {
                if position == 0 {
                    variable_column = Some(columns.len());
                }
                // Rows with `None` are removed by `retain`.
                let values = values.into_iter().map(|value| value.unwrap_or(f64::NAN));
                columns.push(retain(values.collect()));
            }
            Encoded::Levels(labels) => categorical.push((position, labels)),
        }
    }
    for (position, labels) in categorical {
        let labels: Vec<String> = labels
            .into_iter()
            .zip(&keep)
            .filter_map(|(label, &kept)| kept.then_some(label))
            .collect();
        let levels: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
        for (idx, level) in levels.into_iter().skip(1).enumerate() {
            if position == 0 && idx == 0 {
                variable_column = Some(columns.len());
            }
            columns.push(
                labels
                    .iter()
                    .map(|label| if label == level { 1.0 } else { 0.0 })
                    .collect(),
            );
        }
    }

    Design {
        outcome: retain(outcome),
        columns,
        variable_column,
    }
}
