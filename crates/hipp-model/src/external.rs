use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Externally supplied variables keyed by donor identifier:
/// `{ "RRID:SAMN...": { "GCK_expression": 5.2 } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalVariableMap {
    donors: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ExternalVariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, donor: impl Into<String>, variable: impl Into<String>, value: f64) {
        self.donors
            .entry(donor.into())
            .or_default()
            .insert(variable.into(), value);
    }

    pub fn with_value(
        mut self,
        donor: impl Into<String>,
        variable: impl Into<String>,
        value: f64,
    ) -> Self {
        self.insert(donor, variable, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    pub fn donor_count(&self) -> usize {
        self.donors.len()
    }

    pub fn get(&self, donor: &str) -> Option<&BTreeMap<String, f64>> {
        self.donors.get(donor)
    }

    pub fn value(&self, donor: &str, variable: &str) -> Option<f64> {
        self.donors.get(donor)?.get(variable).copied()
    }

    /// Union of variable names across donors, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.donors.values().flat_map(BTreeMap::keys).collect();
        names.into_iter().cloned().collect()
    }

    pub fn donors(&self) -> impl Iterator<Item = &str> {
        self.donors.keys().map(String::as_str)
    }
}

impl FromIterator<(String, BTreeMap<String, f64>)> for ExternalVariableMap {
    fn from_iter<T: IntoIterator<Item = (String, BTreeMap<String, f64>)>>(iter: T) -> Self {
        Self {
            donors: iter.into_iter().collect(),
        }
    }
}

/// Donor identifiers listed per category in an [`ExternalValidation`].
pub const VALIDATION_ID_LIMIT: usize = 20;

/// How an [`ExternalVariableMap`] lines up with the analysis frame.
///
/// `valid` holds when every supplied donor is in the frame and every donor
/// carries the full set of variable names. The identifier lists are sorted
/// and capped at [`VALIDATION_ID_LIMIT`]; the counts are not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalValidation {
    pub valid: bool,
    pub total_provided: usize,
    pub matching_donors: usize,
    pub unmatched_donors: usize,
    pub inconsistent_donors: usize,
    /// Union of variable names across donors, sorted.
    pub variables: Vec<String>,
    pub unmatched_ids: Vec<String>,
    pub inconsistent_ids: Vec<String>,
}
