//! Association runs over an analysis frame.

use tracing::{debug, info, info_span, warn};

use hipp_core::{AnalysisFrame, FieldDescriptor, FieldRole, merge_external};
use hipp_model::{
    AnalysisOptions, AssociationRequest, AssociationSummary, ExternalVariableMap, FailureReason,
    PairEvaluation, PairOutcome, SkipReason,
};

use crate::methods::{AssociationTest, handler};
use crate::pair::PairData;
use crate::report::AssociationReport;

/// Tests every (variable, trait) pair of `request` against `frame`.
///
/// Traits default to the frame's trait columns. Variables are the outer
/// loop. A name the frame does not know skips its pairs, unknown controls
/// are dropped, and a failing test only affects its own pair. Nothing here
/// is an error: every pair ends up in the report with its outcome.
pub fn run(
    frame: &AnalysisFrame,
    request: &AssociationRequest,
    options: &AnalysisOptions,
) -> AssociationReport {
    let method = request.analysis_method;
    let _span = info_span!("associate", method = method.as_str()).entered();

    if frame.is_empty() {
        info!("no samples match filter criteria");
        return AssociationReport::empty("No samples match filter criteria");
    }

    let registry = frame.registry();
    let resolve = |name: &str, role: FieldRole| {
        registry
            .lookup(name, role)
            .filter(|field| frame.has_column(&field.name))
    };

    let trait_names = request
        .traits
        .clone()
        .unwrap_or_else(|| frame.trait_columns());
    let traits: Vec<(&str, Option<&FieldDescriptor>)> = trait_names
        .iter()
        .map(|name| (name.as_str(), resolve(name, FieldRole::Trait)))
        .collect();
    let controls: Vec<&FieldDescriptor> = request
        .control_variables
        .iter()
        .filter_map(|name| resolve(name, FieldRole::Control))
        .collect();

    let test = handler(method);
    let mut summary = AssociationSummary {
        n_samples: frame.height(),
        traits_analyzed: traits.iter().filter(|(_, field)| field.is_some()).count(),
        variables_analyzed: request.variables_of_interest.len(),
        ..AssociationSummary::default()
    };
    let mut evaluations = Vec::with_capacity(request.variables_of_interest.len() * traits.len());

    for variable_name in &request.variables_of_interest {
        let variable = resolve(variable_name, FieldRole::Variable);
        for &(trait_name, trait_field) in &traits {
            let outcome = match (variable, trait_field) {
                (None, _) => PairOutcome::Skipped(SkipReason::UnknownVariable {
                    name: variable_name.clone(),
                }),
                (_, None) => PairOutcome::Skipped(SkipReason::UnknownTrait {
                    name: trait_name.to_string(),
                }),
                (Some(variable), Some(trait_field)) => {
                    evaluate(frame, test, trait_field, variable, &controls, options)
                }
            };
            summary.record(&outcome);
            evaluations.push(PairEvaluation {
                variable: variable_name.clone(),
                trait_name: trait_name.to_string(),
                outcome,
            });
        }
    }

    info!(
        pairs = evaluations.len(),
        succeeded = summary.pairs_succeeded,
        skipped = summary.pairs_skipped(),
        failed = summary.pairs_failed(),
        "association run complete"
    );
    AssociationReport {
        evaluations,
        summary,
    }
}

fn evaluate(
    frame: &AnalysisFrame,
    test: &dyn AssociationTest,
    trait_field: &FieldDescriptor,
    variable: &FieldDescriptor,
    controls: &[&FieldDescriptor],
    options: &AnalysisOptions,
) -> PairOutcome {
    let pair = match PairData::extract(frame, trait_field, variable, controls) {
        Ok(pair) => pair,
        Err(err) => {
            warn!(
                trait_name = %trait_field.name,
                variable = %variable.name,
                error = %err,
                "could not select pair rows"
            );
            return PairOutcome::Failed(FailureReason::Numerical(err.to_string()));
        }
    };
    if pair.height() < options.min_samples {
        return PairOutcome::Skipped(SkipReason::InsufficientSamples {
            available: pair.height(),
            required: options.min_samples,
        });
    }

    match test.evaluate(&pair, options) {
        Ok(estimate) => {
            PairOutcome::Success(estimate.into_result(&pair, test.method(), test.output_fields()))
        }
        Err(exclusion) => {
            let outcome = PairOutcome::from(exclusion);
            if let PairOutcome::Failed(reason) = &outcome {
                debug!(
                    trait_name = %trait_field.name,
                    variable = %variable.name,
                    reason = %reason,
                    "statistical fit failed"
                );
            }
            outcome
        }
    }
}

/// Joins `external` onto `frame` and runs the association over the result.
///
/// The summary lists the injected variable names. An empty filtered frame,
/// an empty map or an empty join yields an empty report with a message.
pub fn run_external(
    frame: &AnalysisFrame,
    external: &ExternalVariableMap,
    request: &AssociationRequest,
    options: &AnalysisOptions,
) -> hipp_core::Result<AssociationReport> {
    let names = external.variable_names();
    let with_names = |mut report: AssociationReport| {
        report.summary.external_variables = Some(names.clone());
        report
    };

    if frame.is_empty() {
        return Ok(with_names(AssociationReport::empty(
            "No samples match filter criteria",
        )));
    }
    if external.is_empty() {
        return Ok(with_names(AssociationReport::empty(
            "No external data provided",
        )));
    }

    let joined = merge_external(frame, external)?;
    if joined.is_empty() {
        info!("no donors in common with external data");
        return Ok(with_names(AssociationReport::empty(
            "No matching samples with external data",
        )));
    }
    Ok(with_names(run(&joined, request, options)))
}
