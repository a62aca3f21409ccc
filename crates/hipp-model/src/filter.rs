//! Filter criteria and the boundary field mapping.
//!
//! [`FilterCriteria`] is keyed by analysis-frame column names and is what the
//! filter engine evaluates. [`FilterRequest`] is the flat, named shape callers
//! send (`gender`, `age_range`, ...). The static [`FILTER_FIELDS`] table is
//! the only place a boundary name is tied to a column and a predicate kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::{AGE, BMI, COLLECTIONS, DIABETES_STATUS, GENDER};

/// Inclusive numeric bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    #[serde(default, alias = "min")]
    pub min_value: Option<f64>,
    #[serde(default, alias = "max")]
    pub max_value: Option<f64>,
}

impl RangeFilter {
    pub fn new(min_value: Option<f64>, max_value: Option<f64>) -> Self {
        Self {
            min_value,
            max_value,
        }
    }

    pub fn between(min_value: f64, max_value: f64) -> Self {
        Self::new(Some(min_value), Some(max_value))
    }

    /// A range with neither bound imposes no constraint.
    pub fn is_active(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }

    /// Missing values never satisfy an active range.
    pub fn contains(&self, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return false;
        };
        if let Some(min) = self.min_value
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max_value
            && value > max
        {
            return false;
        }
        true
    }
}

/// Conjunctive filter over analysis-frame columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Column → accepted values (case-insensitive).
    #[serde(default)]
    pub categorical: BTreeMap<String, Vec<String>>,
    /// Column → inclusive bounds.
    #[serde(default)]
    pub numerical: BTreeMap<String, RangeFilter>,
    /// Column → required value.
    #[serde(default)]
    pub boolean: BTreeMap<String, bool>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categorical<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, column: impl Into<String>, range: RangeFilter) -> Self {
        self.numerical.insert(column.into(), range);
        self
    }

    pub fn with_flag(mut self, column: impl Into<String>, value: bool) -> Self {
        self.boolean.insert(column.into(), value);
        self
    }

    /// True when no group would constrain any row.
    pub fn is_empty(&self) -> bool {
        self.categorical.values().all(Vec::is_empty)
            && self.numerical.values().all(|range| !range.is_active())
            && self.boolean.is_empty()
    }

    /// Columns referenced by an active group, in group order.
    pub fn active_columns(&self) -> Vec<&str> {
        let categorical = self
            .categorical
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(column, _)| column.as_str());
        let numerical = self
            .numerical
            .iter()
            .filter(|(_, range)| range.is_active())
            .map(|(column, _)| column.as_str());
        let boolean = self.boolean.keys().map(String::as_str);
        categorical.chain(numerical).chain(boolean).collect()
    }
}

/// Predicate kind of a boundary filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Categorical,
    Range,
    Flag,
}

/// One boundary filter field and the frame column it constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FilterKind,
}

const fn field(name: &'static str, column: &'static str, kind: FilterKind) -> FilterField {
    FilterField { name, column, kind }
}

/// Boundary filter fields accepted by [`FilterRequest`].
pub const FILTER_FIELDS: &[FilterField] = &[
    field("gender", GENDER, FilterKind::Categorical),
    field("collections", COLLECTIONS, FilterKind::Categorical),
    field("diabetes_status", DIABETES_STATUS, FilterKind::Categorical),
    field("ethnicities", "Ethnicities", FilterKind::Categorical),
    field("cause_of_death", "Cause of Death", FilterKind::Categorical),
    field("donation_type", "Donation Type", FilterKind::Categorical),
    field(
        "isolation_center",
        "biosample_Isolation_center",
        FilterKind::Categorical,
    ),
    field("age_range", AGE, FilterKind::Range),
    field("bmi_range", BMI, FilterKind::Range),
    field("hba1c_range", "HbA1C (percentage)", FilterKind::Range),
    field(
        "diabetes_duration_range",
        "Diabetes Duration (years)",
        FilterKind::Range,
    ),
    field("c_peptide_range", "C-Peptide (ng/ml)", FilterKind::Range),
    field(
        "purity_range",
        "biosample_Purity (Percentage)",
        FilterKind::Range,
    ),
    field(
        "viability_range",
        "biosample_Prep Viability (percentage)",
        FilterKind::Range,
    ),
    field(
        "islet_yield_range",
        "biosample_Islet Yield (IEQ)",
        FilterKind::Range,
    ),
    field("aab_gada_positive", "AAB GADA POSITIVE", FilterKind::Flag),
    field("aab_ia2_positive", "AAB IA2 POSITIVE", FilterKind::Flag),
    field("aab_iaa_positive", "AAB IAA POSITIVE", FilterKind::Flag),
    field("aab_znt8_positive", "AAB ZNT8 POSITIVE", FilterKind::Flag),
    field("multi_aab", "Multi AAB", FilterKind::Flag),
];

/// Looks up a boundary filter field by name.
pub fn filter_field(name: &str) -> Option<&'static FilterField> {
    FILTER_FIELDS.iter().find(|field| field.name == name)
}

/// Value of one boundary filter field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Values(Vec<String>),
    Flag(bool),
    Range(RangeFilter),
}

/// Flat boundary filter request, e.g.
/// `{"gender": ["female"], "age_range": {"min": 18, "max": 65}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterRequest {
    pub fields: BTreeMap<String, Option<FilterValue>>,
}

/// Result of mapping a [`FilterRequest`] onto frame columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConversion {
    pub criteria: FilterCriteria,
    /// Boundary names that are unknown or carry a value of the wrong kind.
    pub ignored: Vec<String>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.fields.insert(name.into(), Some(value));
        self
    }

    /// Maps boundary fields onto frame columns through [`FILTER_FIELDS`].
    ///
    /// `null` values impose no constraint. Unknown names and kind mismatches
    /// are collected in [`FilterConversion::ignored`] rather than rejected.
    pub fn to_criteria(&self) -> FilterConversion {
        let mut conversion = FilterConversion::default();
        for (name, value) in &self.fields {
            let Some(value) = value else {
                continue;
            };
            let Some(field) = filter_field(name) else {
                conversion.ignored.push(name.clone());
                continue;
            };
            let criteria = &mut conversion.criteria;
            match (field.kind, value) {
                (FilterKind::Categorical, FilterValue::Values(values)) => {
                    if !values.is_empty() {
                        criteria
                            .categorical
                            .insert(field.column.to_string(), values.clone());
                    }
                }
                (FilterKind::Range, FilterValue::Range(range)) => {
                    if range.is_active() {
                        criteria.numerical.insert(field.column.to_string(), *range);
                    }
                }
                (FilterKind::Flag, FilterValue::Flag(flag)) => {
                    criteria.boolean.insert(field.column.to_string(), *flag);
                }
                _ => conversion.ignored.push(name.clone()),
            }
        }
        conversion
    }
}
