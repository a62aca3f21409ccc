use hipp_model::{AnalysisMethod, AnalysisOptions, OutputFields};
use hipp_stats::pearson;

use super::{AssociationTest, Estimate, Exclusion, require_samples};
use crate::pair::PairData;

/// Pearson correlation with a fixed 95% Fisher-z interval.
///
/// `std_error` is the standard error of `atanh(r)` and `r_squared` is `r²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationTest;

impl AssociationTest for CorrelationTest {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::Correlation
    }

    fn output_fields(&self) -> OutputFields {
        OutputFields::ALL
    }

    fn evaluate(
        &self,
        pair: &PairData<'_>,
        options: &AnalysisOptions,
    ) -> Result<Estimate, Exclusion> {
        let (x, y): (Vec<f64>, Vec<f64>) = pair
            .numbers(&pair.variable().name)
            .into_iter()
            .zip(pair.outcome())
            .filter_map(|(x, y)| x.map(|x| (x, y)))
            .unzip();
        require_samples(x.len(), options)?;

        let estimate = pearson(&x, &y)?;
        Ok(Estimate {
            coefficient: estimate.r,
            std_error: Some(estimate.std_error),
            p_value: estimate.p_value,
            ci: Some((estimate.ci_lower, estimate.ci_upper)),
            r_squared: Some(estimate.r * estimate.r),
            n_samples: estimate.n,
        })
    }
}
