//! Merge engine: donor × trait inner join plus a first-biosample left join.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use polars::prelude::{AnyValue, Column, DataFrame, IdxCa, IdxSize, NewChunkedArray};
use tracing::{debug, info, info_span, warn};

use hipp_common::any_to_string_non_empty;
use hipp_ingest::SourceRegistry;
use hipp_model::columns::{
    BIOSAMPLE_IDENTIFIER_COLUMNS, DONOR_IDENTIFIER_COLUMNS, TRAIT_IDENTIFIER_COLUMNS,
};
use hipp_model::{MergeOptions, SourceKind, VariableSource, VariableType};

use crate::error::{CoreError, Result};
use crate::frame::{AnalysisFrame, SourceCounts};
use crate::inference::infer_column;
use crate::registry::{FieldDescriptor, FieldRegistry};

fn key_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(column)?;
    Ok((0..column.len())
        .map(|idx| any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

fn require_key(df: &DataFrame, kind: SourceKind, column: &str) -> Result<()> {
    if df.column(column).is_err() {
        return Err(CoreError::MissingKeyColumn {
            kind,
            column: column.to_string(),
        });
    }
    Ok(())
}

fn row_index(idx: usize) -> IdxSize {
    idx as IdxSize
}

/// First row of each distinct key; rows without a key are skipped.
fn first_rows(keys: &[Option<String>]) -> HashMap<&str, IdxSize> {
    let mut first = HashMap::with_capacity(keys.len());
    for (idx, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            first.entry(key.as_str()).or_insert(row_index(idx));
        }
    }
    first
}

/// Builds the analysis frame from a source registry.
///
/// Donors and traits are inner-joined on their identifier, keeping donor
/// order; duplicate donor identifiers keep their first row. Trait columns
/// whose name already exists on the donor side are dropped. The first
/// biosample of each donor is left-joined with every biosample column
/// renamed with the configured prefix.
///
/// # Errors
///
/// [`CoreError::MissingSource`] when the donor or trait source is absent and
/// [`CoreError::MissingKeyColumn`] when a join key is missing.
pub fn build_analysis_frame<S>(sources: &S, options: &MergeOptions) -> Result<AnalysisFrame>
where
    S: SourceRegistry + ?Sized,
{
    let _span = info_span!("merge").entered();
    let donors = sources.donors().ok_or(CoreError::MissingSource {
        kind: SourceKind::Donor,
    })?;
    let traits = sources.traits().ok_or(CoreError::MissingSource {
        kind: SourceKind::Trait,
    })?;
    require_key(donors, SourceKind::Donor, &options.donor_key)?;
    require_key(traits, SourceKind::Trait, &options.trait_key)?;

    let trait_keys = key_values(traits, &options.trait_key)?;
    let trait_rows = first_rows(&trait_keys);
    if trait_rows.len() < trait_keys.iter().flatten().count() {
        debug!("duplicate trait identifiers; first record kept");
    }

    let donor_keys = key_values(donors, &options.donor_key)?;
    let mut seen = BTreeSet::new();
    let mut donor_take = Vec::new();
    let mut trait_take = Vec::new();
    for (idx, key) in donor_keys.iter().enumerate() {
        let Some(key) = key else {
            continue;
        };
        let Some(&trait_idx) = trait_rows.get(key.as_str()) else {
            continue;
        };
        if !seen.insert(key.as_str()) {
            continue;
        }
        donor_take.push(row_index(idx));
        trait_take.push(trait_idx);
    }

    let mut data = donors.take(&IdxCa::from_vec("donor_rows".into(), donor_take))?;
    let trait_part = traits.take(&IdxCa::from_vec("trait_rows".into(), trait_take))?;

    let mut registry = FieldRegistry::new();
    for column in data.get_columns() {
        let name = column.name().as_str();
        let mut field = FieldDescriptor::new(name, infer_column(column), VariableSource::Donor);
        if name == options.donor_key || DONOR_IDENTIFIER_COLUMNS.contains(&name) {
            field = field.identifier();
        }
        registry.insert(field);
    }

    let mut trait_columns: Vec<Column> = Vec::new();
    for column in trait_part.get_columns() {
        let name = column.name().as_str();
        if name == options.trait_key {
            continue;
        }
        if registry.contains(name) {
            debug!(column = name, "trait column shadowed by donor column; dropped");
            continue;
        }
        let field = if TRAIT_IDENTIFIER_COLUMNS.contains(&name) {
            FieldDescriptor::new(name, infer_column(column), VariableSource::Trait).identifier()
        } else {
            FieldDescriptor::new(name, VariableType::Numerical, VariableSource::Trait)
        };
        registry.insert(field);
        trait_columns.push(column.clone());
    }
    data.hstack_mut(&trait_columns)?;

    let biosample_count = match sources.biosamples() {
        Some(biosamples) => {
            let columns = biosample_columns(&data, biosamples, options, &registry)?;
            for column in &columns {
                let name = column.name().as_str();
                let original = name
                    .strip_prefix(options.biosample_prefix.as_str())
                    .unwrap_or(name);
                let mut field =
                    FieldDescriptor::new(name, infer_column(column), VariableSource::Biosample);
                if BIOSAMPLE_IDENTIFIER_COLUMNS.contains(&original) {
                    field = field.identifier();
                }
                registry.insert(field);
            }
            data.hstack_mut(&columns)?;
            Some(biosamples.height())
        }
        None => {
            debug!("no biosample source; frame has no biosample columns");
            None
        }
    };

    let counts = SourceCounts {
        donors: donors.height(),
        biosamples: biosample_count,
        traits: traits.height(),
    };
    info!(
        donors = counts.donors,
        traits = counts.traits,
        rows = data.height(),
        columns = data.width(),
        "analysis frame built"
    );
    if data.height() == 0 {
        info!("no donor has functional trait data");
    }
    Ok(AnalysisFrame::new(
        data,
        options.donor_key.clone(),
        Arc::new(registry),
        counts,
    ))
}

/// Prefixed biosample columns aligned to the rows of `frame`.
///
/// When either side of the link is missing every column is null, so a
/// broken biosample source degrades to empty columns rather than failing.
fn biosample_columns(
    frame: &DataFrame,
    biosamples: &DataFrame,
    options: &MergeOptions,
    registry: &FieldRegistry,
) -> Result<Vec<Column>> {
    let link = options.biosample_donor_column.as_str();
    let linked = biosamples.column(link).is_ok()
        && frame.column(&options.biosample_target_column).is_ok();

    let indices: Vec<Option<IdxSize>> = if linked {
        let references = key_values(biosamples, link)?;
        let first = first_rows(&references);
        key_values(frame, &options.biosample_target_column)?
            .iter()
            .map(|key| key.as_deref().and_then(|key| first.get(key).copied()))
            .collect()
    } else {
        warn!(
            link_column = link,
            target_column = %options.biosample_target_column,
            "biosample source cannot be linked to donors; biosample columns will be empty"
        );
        vec![None; frame.height()]
    };
    let matched = indices.iter().flatten().count();
    debug!(rows = frame.height(), matched, "biosamples linked");

    let gathered = biosamples.take(&IdxCa::from_iter_options(
        "biosample_rows".into(),
        indices.into_iter(),
    ))?;
    let mut columns = Vec::new();
    for column in gathered.get_columns() {
        let name = column.name().as_str();
        if name == link {
            continue;
        }
        let prefixed = format!("{}{name}", options.biosample_prefix);
        if registry.contains(&prefixed) {
            warn!(
                column = %prefixed,
                "biosample column collides with an existing column; dropped"
            );
            continue;
        }
        columns.push(column.clone().with_name(prefixed.into()));
    }
    Ok(columns)
}
