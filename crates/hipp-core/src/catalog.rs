//! Variable discovery, filter options and filtered views.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame};

use hipp_common::{any_to_f64, any_to_string_non_empty};
use hipp_model::{
    FILTER_FIELDS, FilterKind, FilterMetadata, NumericBounds, ValueRange, VariableCatalog,
    VariableDescriptor, VariableSource, VariableType,
};

use crate::error::Result;
use crate::frame::AnalysisFrame;
use crate::registry::FieldDescriptor;

/// Maximum number of distinct values listed for a categorical variable.
pub const CATEGORICAL_VALUE_LIMIT: usize = 50;

const TRAIT_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Basal Secretion",
        "Average secretion rate during baseline period",
    ),
    ("AUC", "Area under the curve during stimulation"),
    ("SI", "Stimulation index (fold change from basal)"),
    ("II", "Inhibition index"),
    ("phase 1", "First phase secretion response"),
    ("phase 2", "Second phase secretion response"),
];

/// Short description of a trait, matched on well-known name fragments.
pub fn trait_description(name: &str) -> Option<&'static str> {
    TRAIT_DESCRIPTIONS
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, description)| *description)
}

fn distinct_values(column: &Column) -> Vec<String> {
    let values: BTreeSet<String> = (0..column.len())
        .filter_map(|idx| any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    values.into_iter().collect()
}

fn numeric_range(column: &Column) -> ValueRange {
    (0..column.len())
        .filter_map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .fold(ValueRange::default(), |range, value| ValueRange {
            min: Some(range.min.map_or(value, |min| min.min(value))),
            max: Some(range.max.map_or(value, |max| max.max(value))),
        })
}

fn describe(field: &FieldDescriptor, column: &Column) -> VariableDescriptor {
    let mut descriptor = VariableDescriptor {
        name: field.name.clone(),
        kind: field.kind,
        source: field.source,
        description: None,
        unique_values: None,
        range: None,
    };
    match field.kind {
        VariableType::Categorical => {
            let mut values = distinct_values(column);
            values.truncate(CATEGORICAL_VALUE_LIMIT);
            descriptor.unique_values = Some(values);
        }
        VariableType::Numerical => descriptor.range = Some(numeric_range(column)),
        VariableType::Boolean => {}
    }
    if field.source == VariableSource::Trait {
        let description = trait_description(&field.name).unwrap_or_default();
        descriptor.description = Some(description.to_string());
    }
    descriptor
}

/// Describes every non-identifier column of `frame`, grouped by source.
pub fn variable_catalog(frame: &AnalysisFrame) -> VariableCatalog {
    let mut catalog = VariableCatalog::default();
    for field in frame.registry().iter().filter(|field| !field.identifier) {
        let Ok(column) = frame.data().column(&field.name) else {
            continue;
        };
        let descriptor = describe(field, column);
        match field.source {
            VariableSource::Donor => catalog.donor_variables.push(descriptor),
            VariableSource::Biosample => catalog.biosample_variables.push(descriptor),
            VariableSource::Trait => catalog.trait_variables.push(descriptor),
            VariableSource::External => catalog.external_variables.push(descriptor),
        }
    }
    catalog
}

/// Options for each boundary filter field whose column is in `frame`.
pub fn filter_metadata(frame: &AnalysisFrame) -> FilterMetadata {
    let mut metadata = FilterMetadata {
        total_donors: frame.counts().donors,
        donors_with_functional_data: frame.height(),
        ..FilterMetadata::default()
    };
    for field in FILTER_FIELDS {
        let Ok(column) = frame.data().column(field.column) else {
            continue;
        };
        match field.kind {
            FilterKind::Categorical => {
                metadata
                    .categorical_filters
                    .insert(field.name.to_string(), distinct_values(column));
            }
            FilterKind::Range => {
                if let ValueRange {
                    min: Some(min),
                    max: Some(max),
                } = numeric_range(column)
                {
                    metadata
                        .numerical_filters
                        .insert(field.name.to_string(), NumericBounds { min, max });
                }
            }
            FilterKind::Flag => {}
        }
    }
    metadata
}

/// Donor identifiers of `frame`, in row order.
pub fn donor_ids(frame: &AnalysisFrame) -> Vec<String> {
    (0..frame.height())
        .filter_map(|idx| frame.donor_id(idx))
        .collect()
}

/// Donor-source columns of `frame`, identifiers included.
pub fn donor_metadata(frame: &AnalysisFrame) -> Result<DataFrame> {
    let columns: Vec<String> = frame
        .registry()
        .iter()
        .filter(|field| field.source == VariableSource::Donor)
        .filter(|field| frame.has_column(&field.name))
        .map(|field| field.name.clone())
        .collect();
    Ok(frame.data().select(columns)?)
}

/// The donor identifier followed by every trait column of `frame`.
pub fn trait_table(frame: &AnalysisFrame) -> Result<DataFrame> {
    let mut columns = vec![frame.key().to_string()];
    columns.extend(frame.trait_columns());
    Ok(frame.data().select(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_descriptions_follow_name_fragments() {
        assert_eq!(
            trait_description("Ins AUC (phase 2)"),
            Some("Area under the curve during stimulation")
        );
        assert_eq!(
            trait_description("GCG SI 16.7G"),
            Some("Stimulation index (fold change from basal)")
        );
        assert_eq!(trait_description("Total content"), None);
    }
}
