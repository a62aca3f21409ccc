use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{VariableSource, VariableType};

/// Observed bounds of a numerical column. Both sides are `None` when the
/// column has no numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Describes one analysable column for discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableType,
    pub source: VariableSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sorted distinct values, capped; categorical columns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<Vec<String>>,
    /// Numerical columns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
}

/// Variable descriptors grouped by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableCatalog {
    pub donor_variables: Vec<VariableDescriptor>,
    pub biosample_variables: Vec<VariableDescriptor>,
    pub trait_variables: Vec<VariableDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_variables: Vec<VariableDescriptor>,
}

impl VariableCatalog {
    pub fn len(&self) -> usize {
        self.donor_variables.len()
            + self.biosample_variables.len()
            + self.trait_variables.len()
            + self.external_variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.donor_variables
            .iter()
            .chain(&self.biosample_variables)
            .chain(&self.trait_variables)
            .chain(&self.external_variables)
    }

    pub fn get(&self, name: &str) -> Option<&VariableDescriptor> {
        self.iter().find(|descriptor| descriptor.name == name)
    }
}

/// Finite numeric bounds reported for a range filter field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
}

/// Options available to the boundary filter fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterMetadata {
    /// Boundary field name → sorted distinct values.
    pub categorical_filters: BTreeMap<String, Vec<String>>,
    /// Boundary field name → observed bounds.
    pub numerical_filters: BTreeMap<String, NumericBounds>,
    pub total_donors: usize,
    pub donors_with_functional_data: usize,
}
