//! One handler per analysis method.
//!
//! Handlers receive the complete-case rows of a pair and return either an
//! [`Estimate`] or an [`Exclusion`]. The engine turns an estimate into an
//! [`AssociationResult`], keeping only the fields the handler declares in
//! [`AssociationTest::output_fields`].

mod correlation;
mod group;
mod regression;

pub use correlation::CorrelationTest;
pub use group::{AnovaTest, KruskalWallisTest};
pub use regression::LinearRegressionTest;

use hipp_model::{
    AnalysisMethod, AnalysisOptions, AssociationResult, FailureReason, OutputFields, PairOutcome,
    SkipReason,
};
use hipp_stats::StatsError;

use crate::pair::PairData;

/// A statistical test between one variable and one trait.
pub trait AssociationTest: Send + Sync {
    fn method(&self) -> AnalysisMethod;

    /// Optional result fields this test populates.
    fn output_fields(&self) -> OutputFields;

    fn evaluate(
        &self,
        pair: &PairData<'_>,
        options: &AnalysisOptions,
    ) -> Result<Estimate, Exclusion>;
}

/// Handler for a method.
pub fn handler(method: AnalysisMethod) -> &'static dyn AssociationTest {
    match method {
        AnalysisMethod::LinearRegression => &LinearRegressionTest,
        AnalysisMethod::Correlation => &CorrelationTest,
        AnalysisMethod::Anova => &AnovaTest,
        AnalysisMethod::KruskalWallis => &KruskalWallisTest,
    }
}

/// Raw output of a handler before field selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub coefficient: f64,
    pub std_error: Option<f64>,
    pub p_value: f64,
    pub ci: Option<(f64, f64)>,
    pub r_squared: Option<f64>,
    pub n_samples: usize,
}

impl Estimate {
    pub fn into_result(
        self,
        pair: &PairData<'_>,
        method: AnalysisMethod,
        fields: OutputFields,
    ) -> AssociationResult {
        let ci = self.ci.filter(|_| fields.confidence_interval);
        AssociationResult {
            trait_name: pair.trait_name().to_string(),
            variable: pair.variable().name.clone(),
            coefficient: self.coefficient,
            std_error: self.std_error.filter(|_| fields.std_error),
            p_value: self.p_value,
            ci_lower: ci.map(|(lower, _)| lower),
            ci_upper: ci.map(|(_, upper)| upper),
            r_squared: self.r_squared.filter(|_| fields.r_squared),
            n_samples: self.n_samples,
            method,
        }
    }
}

/// Why a handler produced no estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    Skip(SkipReason),
    Fail(FailureReason),
}

impl From<SkipReason> for Exclusion {
    fn from(reason: SkipReason) -> Self {
        Self::Skip(reason)
    }
}

impl From<StatsError> for Exclusion {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InsufficientData {
                required,
                available,
            } => Self::Skip(SkipReason::InsufficientSamples {
                available,
                required,
            }),
            StatsError::ZeroVariance => Self::Fail(FailureReason::ZeroVariance),
            StatsError::SingularDesign => Self::Fail(FailureReason::SingularDesign),
            StatsError::IdenticalValues => Self::Fail(FailureReason::IdenticalValues),
            StatsError::NoResidualDegreesOfFreedom => {
                Self::Fail(FailureReason::NoResidualDegreesOfFreedom)
            }
            other => Self::Fail(FailureReason::Numerical(other.to_string())),
        }
    }
}

impl From<Exclusion> for PairOutcome {
    fn from(exclusion: Exclusion) -> Self {
        match exclusion {
            Exclusion::Skip(reason) => Self::Skipped(reason),
            Exclusion::Fail(reason) => Self::Failed(reason),
        }
    }
}

/// Skips when fewer than `options.min_samples` rows remain.
pub(crate) fn require_samples(available: usize, options: &AnalysisOptions) -> Result<(), Exclusion> {
    if available < options.min_samples {
        return Err(SkipReason::InsufficientSamples {
            available,
            required: options.min_samples,
        }
        .into());
    }
    Ok(())
}
