//! Association requests, per-pair outcomes and run summaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::AnalysisMethod;

/// Variables, covariates and traits to test, plus the method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationRequest {
    #[serde(alias = "variables")]
    pub variables_of_interest: Vec<String>,
    #[serde(default, alias = "controls")]
    pub control_variables: Vec<String>,
    /// `None` tests every trait column of the frame.
    #[serde(default)]
    pub traits: Option<Vec<String>>,
    #[serde(default, alias = "method")]
    pub analysis_method: AnalysisMethod,
}

impl AssociationRequest {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables_of_interest: variables.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_controls<I, S>(mut self, controls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.control_variables = controls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = Some(traits.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_method(mut self, method: AnalysisMethod) -> Self {
        self.analysis_method = method;
        self
    }
}

/// Which optional result fields a test populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFields {
    pub std_error: bool,
    pub confidence_interval: bool,
    pub r_squared: bool,
}

impl OutputFields {
    pub const ALL: Self = Self {
        std_error: true,
        confidence_interval: true,
        r_squared: true,
    };

    pub const STATISTIC_ONLY: Self = Self {
        std_error: false,
        confidence_interval: false,
        r_squared: false,
    };
}

/// Quantified outcome of one test between one variable and one trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationResult {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub variable: String,
    /// Regression coefficient, correlation r, F or H statistic.
    pub coefficient: f64,
    pub std_error: Option<f64>,
    pub p_value: f64,
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
    pub r_squared: Option<f64>,
    pub n_samples: usize,
    pub method: AnalysisMethod,
}

/// Why a pair was not tested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    UnknownTrait { name: String },
    UnknownVariable { name: String },
    InsufficientSamples { available: usize, required: usize },
    InsufficientGroups { available: usize, required: usize },
    /// The variable produced no predictor column (e.g. a single-level category).
    NoEncodedColumn,
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTrait { .. } => "unknown_trait",
            Self::UnknownVariable { .. } => "unknown_variable",
            Self::InsufficientSamples { .. } => "insufficient_samples",
            Self::InsufficientGroups { .. } => "insufficient_groups",
            Self::NoEncodedColumn => "no_encoded_column",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTrait { name } => write!(f, "trait '{name}' not in frame"),
            Self::UnknownVariable { name } => write!(f, "variable '{name}' not in frame"),
            Self::InsufficientSamples {
                available,
                required,
            } => write!(f, "{available} valid rows, {required} required"),
            Self::InsufficientGroups {
                available,
                required,
            } => write!(f, "{available} usable groups, {required} required"),
            Self::NoEncodedColumn => f.write_str("variable produced no predictor column"),
        }
    }
}

/// Numerical failure inside a specific test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    SingularDesign,
    ZeroVariance,
    IdenticalValues,
    NoResidualDegreesOfFreedom,
    Numerical(String),
}

impl FailureReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SingularDesign => "singular_design",
            Self::ZeroVariance => "zero_variance",
            Self::IdenticalValues => "identical_values",
            Self::NoResidualDegreesOfFreedom => "no_residual_df",
            Self::Numerical(_) => "numerical",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingularDesign => f.write_str("design matrix is singular"),
            Self::ZeroVariance => f.write_str("zero variance"),
            Self::IdenticalValues => f.write_str("all values are identical"),
            Self::NoResidualDegreesOfFreedom => f.write_str("no residual degrees of freedom"),
            Self::Numerical(detail) => write!(f, "numerical failure: {detail}"),
        }
    }
}

/// Result of evaluating one (variable, trait) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PairOutcome {
    Success(AssociationResult),
    Skipped(SkipReason),
    Failed(FailureReason),
}

impl PairOutcome {
    pub fn result(&self) -> Option<&AssociationResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A pair together with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEvaluation {
    pub variable: String,
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub outcome: PairOutcome,
}

/// Counts describing an association run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationSummary {
    /// Rows in the analysed frame (not per pair).
    pub n_samples: usize,
    pub traits_analyzed: usize,
    pub variables_analyzed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_variables: Option<Vec<String>>,
    pub pairs_succeeded: usize,
    /// Skip reason code → count.
    #[serde(default)]
    pub skipped: BTreeMap<String, usize>,
    /// Failure reason code → count.
    #[serde(default)]
    pub failed: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssociationSummary {
    pub fn pairs_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn pairs_failed(&self) -> usize {
        self.failed.values().sum()
    }

    /// Tallies one pair outcome.
    pub fn record(&mut self, outcome: &PairOutcome) {
        match outcome {
            PairOutcome::Success(_) => self.pairs_succeeded += 1,
            PairOutcome::Skipped(reason) => {
                *self.skipped.entry(reason.code().to_string()).or_default() += 1;
            }
            PairOutcome::Failed(reason) => {
                *self.failed.entry(reason.code().to_string()).or_default() += 1;
            }
        }
    }
}
