//! Group-based tests: the variable's values define groups of trait values.

use hipp_model::{AnalysisMethod, AnalysisOptions, OutputFields, SkipReason};
use hipp_stats::{GroupTest, kruskal_wallis, one_way_anova};

use super::{AssociationTest, Estimate, Exclusion};
use crate::pair::PairData;

/// Trait values grouped by the variable's text, in first-appearance order.
///
/// Groups smaller than `options.min_group_size` are dropped; fewer than
/// `options.min_groups` remaining groups skips the pair.
fn groups(pair: &PairData<'_>, options: &AnalysisOptions) -> Result<Vec<Vec<f64>>, Exclusion> {
    let mut labels: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<f64>> = Vec::new();
    for (label, value) in pair
        .labels(&pair.variable().name)
        .into_iter()
        .zip(pair.outcome())
    {
        if label.is_empty() {
            continue;
        }
        match labels.iter().position(|known| *known == label) {
            Some(idx) => groups[idx].push(value),
            None => {
                labels.push(label);
                groups.push(vec![value]);
            }
        }
    }
    groups.retain(|group| group.len() >= options.min_group_size);
    if groups.len() < options.min_groups {
        return Err(SkipReason::InsufficientGroups {
            available: groups.len(),
            required: options.min_groups,
        }
        .into());
    }
    Ok(groups)
}

fn estimate(test: &GroupTest) -> Estimate {
    Estimate {
        coefficient: test.statistic,
        std_error: None,
        p_value: test.p_value,
        ci: None,
        r_squared: None,
        n_samples: test.n,
    }
}

/// One-way ANOVA; the coefficient is F.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnovaTest;

impl AssociationTest for AnovaTest {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::Anova
    }

    fn output_fields(&self) -> OutputFields {
        OutputFields::STATISTIC_ONLY
    }

    fn evaluate(
        &self,
        pair: &PairData<'_>,
        options: &AnalysisOptions,
    ) -> Result<Estimate, Exclusion> {
        let groups = groups(pair, options)?;
        Ok(estimate(&one_way_anova(&groups)?))
    }
}

/// Kruskal-Wallis H test; the coefficient is H.
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalWallisTest;

impl AssociationTest for KruskalWallisTest {
    fn method(&self) -> AnalysisMethod {
        AnalysisMethod::KruskalWallis
    }

    fn output_fields(&self) -> OutputFields {
        OutputFields::STATISTIC_ONLY
    }

    fn evaluate(
        &self,
        pair: &PairData<'_>,
        options: &AnalysisOptions,
    ) -> Result<Estimate, Exclusion> {
        let groups = groups(pair, options)?;
        Ok(estimate(&kruskal_wallis(&groups)?))
    }
}
