//! Filter engine.
//!
//! Each active criteria group is an independent predicate over one column;
//! the result keeps the rows every predicate accepts. Missing values never
//! satisfy an active predicate.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, Column, NewChunkedArray};
use tracing::{debug, info, info_span};

use hipp_common::{any_is_missing, any_to_bool, any_to_f64, any_to_string};
use hipp_model::FilterCriteria;

use crate::error::Result;
use crate::frame::AnalysisFrame;
use crate::registry::FieldRole;

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

fn resolve<'a>(frame: &'a AnalysisFrame, name: &str) -> Option<&'a Column> {
    frame.registry().lookup(name, FieldRole::Filter)?;
    frame.data().column(name).ok()
}

fn narrow(mask: &mut [bool], column: &Column, accept: impl Fn(AnyValue<'_>) -> bool) {
    for (idx, keep) in mask.iter_mut().enumerate() {
        if *keep {
            *keep = accept(column.get(idx).unwrap_or(AnyValue::Null));
        }
    }
}

/// Row mask of `criteria` over `frame`. Unknown columns impose no constraint.
pub fn filter_mask(frame: &AnalysisFrame, criteria: &FilterCriteria) -> Vec<bool> {
    let mut mask = vec![true; frame.height()];

    for (name, values) in &criteria.categorical {
        if values.is_empty() {
            continue;
        }
        let Some(column) = resolve(frame, name) else {
            continue;
        };
        let accepted: BTreeSet<String> = values.iter().map(|value| fold(value)).collect();
        narrow(&mut mask, column, |value| {
            !any_is_missing(&value) && accepted.contains(&fold(&any_to_string(value)))
        });
    }

    for (name, range) in &criteria.numerical {
        if !range.is_active() {
            continue;
        }
        let Some(column) = resolve(frame, name) else {
            continue;
        };
        narrow(&mut mask, column, |value| range.contains(any_to_f64(value)));
    }

    for (name, target) in &criteria.boolean {
        let Some(column) = resolve(frame, name) else {
            continue;
        };
        narrow(&mut mask, column, |value| any_to_bool(value) == Some(*target));
    }

    mask
}

/// Returns the rows of `frame` matching `criteria`.
///
/// The result shares the frame's field registry.
pub fn apply(frame: &AnalysisFrame, criteria: &FilterCriteria) -> Result<AnalysisFrame> {
    let _span = info_span!("filter").entered();
    if criteria.is_empty() {
        debug!(rows = frame.height(), "no active filter criteria");
        return Ok(frame.clone());
    }
    let mask = filter_mask(frame, criteria);
    let mask = BooleanChunked::from_slice("filter".into(), &mask);
    let data = frame.data().filter(&mask)?;
    debug!(
        columns = ?criteria.active_columns(),
        before = frame.height(),
        after = data.height(),
        "filter applied"
    );
    if data.height() == 0 {
        info!("no donors match filter criteria");
    }
    Ok(frame.with_data(data))
}
