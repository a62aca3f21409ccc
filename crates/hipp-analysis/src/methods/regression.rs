use hipp_model::{AnalysisMethod, AnalysisOptions, OutputFields, SkipReason};
use hipp_stats::fit_ols;

use super::{AssociationTest, Estimate, Exclusion, require_samples};
use crate::design;
use crate::pair::PairData;

/// Ordinary least squares of the trait on the variable and the controls.
///
/// Reports the first column encoding the variable; for a categorical
/// variable that is the indicator of its second sorted level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegressionTest;

impl AssociationTest for LinearRegressionTest {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::LinearRegression
    }

    fn output_fields(&self) -> OutputFields {
        OutputFields::ALL
    }

    fn evaluate(
        &self,
        pair: &PairData<'_>,
        options: &AnalysisOptions,
    ) -> Result<Estimate, Exclusion> {
        let design = design::build(pair);
        require_samples(design.n_obs(), options)?;
        let column = design
            .variable_column
            .ok_or(Exclusion::Skip(SkipReason::NoEncodedColumn))?;

        let fit = fit_ols(&design.outcome, &design.columns)?;
        let term = fit
            .predictor(column)
            .ok_or(Exclusion::Skip(SkipReason::NoEncodedColumn))?;
        Ok(Estimate {
            coefficient: term.estimate,
            std_error: Some(term.std_error),
            p_value: term.p_value,
            ci: Some((term.ci_lower, term.ci_upper)),
            r_squared: Some(fit.r_squared),
            n_samples: fit.n_obs,
        })
    }
}
