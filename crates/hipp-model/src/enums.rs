use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Statistical type of a frame column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Categorical,
    Numerical,
    Boolean,
}

impl VariableType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Numerical => "numerical",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a column of the analysis frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableSource {
    Donor,
    Biosample,
    Trait,
    External,
}

impl VariableSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Biosample => "biosample",
            Self::Trait => "trait",
            Self::External => "external",
        }
    }
}

impl fmt::Display for VariableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three record collections held by a source registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Donor,
    Biosample,
    Trait,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Biosample => "biosample",
            Self::Trait => "trait",
        }
    }

    /// Donor and trait sources are required to build an analysis frame.
    pub fn is_mandatory(self) -> bool {
        !matches!(self, Self::Biosample)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association test selector.
///
/// Deserialization is lenient: any name that is not one of the four methods
/// (including `logistic_regression`, which older clients send) resolves to
/// [`AnalysisMethod::LinearRegression`]. Use [`FromStr`] for strict parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum AnalysisMethod {
    #[default]
    LinearRegression,
    Correlation,
    Anova,
    KruskalWallis,
}

impl AnalysisMethod {
    pub const ALL: [Self; 4] = [
        Self::LinearRegression,
        Self::Correlation,
        Self::Anova,
        Self::KruskalWallis,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinearRegression => "linear_regression",
            Self::Correlation => "correlation",
            Self::Anova => "anova",
            Self::KruskalWallis => "kruskal_wallis",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::LinearRegression => "Linear Regression",
            Self::Correlation => "Pearson Correlation",
            Self::Anova => "One-way ANOVA",
            Self::KruskalWallis => "Kruskal-Wallis H-test",
        }
    }

    /// What the test does and when it applies.
    pub fn description(self) -> &'static str {
        match self {
            Self::LinearRegression => {
                "OLS regression with control variables; use for continuous outcomes or several predictors"
            }
            Self::Correlation => {
                "Pearson r between two continuous variables; use for a simple bivariate relationship"
            }
            Self::Anova => {
                "Compares trait means across variable levels; use for a categorical variable with a roughly normal trait"
            }
            Self::KruskalWallis => {
                "Rank-based alternative to ANOVA; use for a categorical variable when the trait may not be normal"
            }
        }
    }

    /// Resolves a method name, falling back to linear regression for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Group-based tests compare trait distributions across variable levels.
    pub fn is_group_based(self) -> bool {
        matches!(self, Self::Anova | Self::KruskalWallis)
    }
}

impl FromStr for AnalysisMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == key)
            .ok_or_else(|| ModelError::UnknownMethod(s.to_string()))
    }
}

impl From<String> for AnalysisMethod {
    fn from(value: String) -> Self {
        Self::from_name_or_default(&value)
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
