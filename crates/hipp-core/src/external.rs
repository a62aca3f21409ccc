//! External variable merge.

use std::collections::BTreeSet;
use std::sync::Arc;

use polars::prelude::{Column, IdxCa, IdxSize, IntoColumn, NamedFrom, NewChunkedArray, Series};
use tracing::{debug, info, warn};

use hipp_model::{ExternalValidation, ExternalVariableMap, VALIDATION_ID_LIMIT, VariableSource};

use crate::catalog::donor_ids;
use crate::error::Result;
use crate::frame::AnalysisFrame;
use crate::inference::infer_column;
use crate::registry::{FieldDescriptor, FieldRegistry};

/// Inner-joins externally supplied per-donor values onto `frame`.
///
/// Only donors present in both survive, in frame order. Each external
/// variable becomes a numeric column (null for donors that lack it) and is
/// registered with source [`VariableSource::External`]. Names that already
/// exist in the frame are ignored. An empty map yields zero rows.
pub fn merge_external(
    frame: &AnalysisFrame,
    external: &ExternalVariableMap,
) -> Result<AnalysisFrame> {
    if external.is_empty() {
        info!("no external data provided");
        return Ok(frame.with_data(frame.data().clear()));
    }

    let names: Vec<String> = external
        .variable_names()
        .into_iter()
        .filter(|name| {
            let clash = frame.has_column(name);
            if clash {
                warn!(
                    variable = %name,
                    "external variable shadows a frame column; ignored"
                );
            }
            !clash
        })
        .collect();

    let mut rows: Vec<IdxSize> = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); names.len()];
    for idx in 0..frame.height() {
        let Some(donor) = frame.donor_id(idx) else {
            continue;
        };
        let Some(donor_values) = external.get(&donor) else {
            continue;
        };
        rows.push(idx as IdxSize);
        for (column, name) in values.iter_mut().zip(&names) {
            let value = donor_values.get(name).copied();
            column.push(value.filter(|value| value.is_finite()));
        }
    }
    debug!(
        supplied = external.donor_count(),
        matched = rows.len(),
        "external donors matched"
    );

    let mut data = frame
        .data()
        .take(&IdxCa::from_vec("external_rows".into(), rows))?;
    let columns: Vec<Column> = names
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    data.hstack_mut(&columns)?;

    let mut registry = FieldRegistry::clone(frame.registry());
    for column in &columns {
        registry.insert(FieldDescriptor::new(
            column.name().as_str(),
            infer_column(column),
            VariableSource::External,
        ));
    }
    if data.height() == 0 {
        info!("no matching samples with external data");
    }
    Ok(frame.with_data_and_registry(data, Arc::new(registry)))
}

/// Checks `external` against the donors of `frame` before a merge.
///
/// Reports supplied donors the frame does not know and donors whose
/// variable set differs from the union across all donors.
pub fn validate_external(
    frame: &AnalysisFrame,
    external: &ExternalVariableMap,
) -> ExternalValidation {
    let known: BTreeSet<String> = donor_ids(frame).into_iter().collect();
    let variables = external.variable_names();

    let mut validation = ExternalValidation {
        total_provided: external.donor_count(),
        ..ExternalValidation::default()
    };
    for donor in external.donors() {
        if known.contains(donor) {
            validation.matching_donors += 1;
        } else {
            validation.unmatched_donors += 1;
            if validation.unmatched_ids.len() < VALIDATION_ID_LIMIT {
                validation.unmatched_ids.push(donor.to_string());
            }
        }
        let complete = external
            .get(donor)
            .is_some_and(|values| values.len() == variables.len());
        if !complete {
            validation.inconsistent_donors += 1;
            if validation.inconsistent_ids.len() < VALIDATION_ID_LIMIT {
                validation.inconsistent_ids.push(donor.to_string());
            }
        }
    }
    validation.valid = validation.unmatched_donors == 0 && validation.inconsistent_donors == 0;
    validation.variables = variables;
    debug!(
        supplied = validation.total_provided,
        matched = validation.matching_donors,
        inconsistent = validation.inconsistent_donors,
        "external data validated"
    );
    validation
}
