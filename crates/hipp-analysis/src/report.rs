//! Outcome of an association run.

use serde::Serialize;

use hipp_model::{AssociationResult, AssociationSummary, PairEvaluation, PairOutcome};
use hipp_stats::benjamini_hochberg;

/// Every evaluated pair plus the run summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssociationReport {
    pub evaluations: Vec<PairEvaluation>,
    pub summary: AssociationSummary,
}

impl AssociationReport {
    /// Report for a run that had nothing to analyse.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            evaluations: Vec::new(),
            summary: AssociationSummary {
                message: Some(message.into()),
                ..AssociationSummary::default()
            },
        }
    }

    /// Successful results in evaluation order.
    pub fn results(&self) -> impl Iterator<Item = &AssociationResult> {
        self.evaluations
            .iter()
            .filter_map(|evaluation| evaluation.outcome.result())
    }

    pub fn into_results(self) -> Vec<AssociationResult> {
        self.evaluations
            .into_iter()
            .filter_map(|evaluation| match evaluation.outcome {
                PairOutcome::Success(result) => Some(result),
                _ => None,
            })
            .collect()
    }

    /// Benjamini-Hochberg adjusted p-values, aligned with [`Self::results`].
    ///
    /// Not applied to the results themselves.
    pub fn adjusted_p_values(&self) -> Vec<f64> {
        let raw: Vec<f64> = self.results().map(|result| result.p_value).collect();
        benjamini_hochberg(&raw)
    }
}
