use std::sync::Arc;

use polars::prelude::{AnyValue, DataFrame};

use hipp_common::any_to_string_non_empty;

use crate::registry::FieldRegistry;

/// Row counts of the sources a frame was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub donors: usize,
    /// `None` when the biosample source was absent.
    pub biosamples: Option<usize>,
    pub traits: usize,
}

/// Donor-keyed table of donor, trait and biosample columns.
///
/// Holds at most one row per donor identifier. Filtered and externally
/// extended frames share the registry of the frame they came from unless
/// they add columns.
#[derive(Debug, Clone)]
pub struct AnalysisFrame {
    data: DataFrame,
    key: String,
    registry: Arc<FieldRegistry>,
    counts: SourceCounts,
}

impl AnalysisFrame {
    /// Wraps merged data with its registry and source counts.
    pub fn new(
        data: DataFrame,
        key: impl Into<String>,
        registry: Arc<FieldRegistry>,
        counts: SourceCounts,
    ) -> Self {
        Self {
            data,
            key: key.into(),
            registry,
            counts,
        }
    }

    /// Same registry and provenance over different rows.
    pub fn with_data(&self, data: DataFrame) -> Self {
        Self {
            data,
            key: self.key.clone(),
            registry: Arc::clone(&self.registry),
            counts: self.counts,
        }
    }

    pub(crate) fn with_data_and_registry(
        &self,
        data: DataFrame,
        registry: Arc<FieldRegistry>,
    ) -> Self {
        Self {
            data,
            key: self.key.clone(),
            registry,
            counts: self.counts,
        }
    }

    /// Underlying polars frame, one row per donor.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    /// Donor identifier column.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field descriptors for every column of the frame.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn shared_registry(&self) -> Arc<FieldRegistry> {
        Arc::clone(&self.registry)
    }

    /// Source row counts recorded at merge time.
    pub fn counts(&self) -> SourceCounts {
        self.counts
    }

    /// Number of donors.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// True when `name` is a column of the data, whatever the registry says.
    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// Donor identifier of a row, if present.
    pub fn donor_id(&self, idx: usize) -> Option<String> {
        let column = self.data.column(&self.key).ok()?;
        any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null))
    }

    /// Trait columns present in this frame, in frame order.
    pub fn trait_columns(&self) -> Vec<String> {
        self.registry
            .trait_columns()
            .filter(|name| self.has_column(name))
            .map(str::to_string)
            .collect()
    }
}
