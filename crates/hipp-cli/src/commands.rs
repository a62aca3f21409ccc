use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, trace, warn};

use hipp_analysis::AssociationReport;
use hipp_cli::config::{
    association_request, criteria_from_arg, load_analysis_frame, load_external,
};
use hipp_cli::logging::redact_value;
use hipp_cli::summary::{
    catalog_table, exclusions_table, filter_metadata_table, frame_records, methods_table,
    results_table, summary_lines, validation_lines,
};
use hipp_core::{
    AnalysisFrame, apply, donor_ids, donor_metadata, filter_metadata, trait_table,
    validate_external, variable_catalog,
};
use hipp_model::{AnalysisMethod, AnalysisOptions, AssociationRequest, ExternalValidation};

use crate::cli::{
    AssociateArgs, CatalogArgs, DataArgs, ExternalArgs, FilterArgs, FilterViewArg, MethodsArgs,
    OutputFormatArg,
};

fn load_frame(data: &DataArgs) -> Result<Arc<AnalysisFrame>> {
    load_analysis_frame(&data.overrides().resolve())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize output")?
    );
    Ok(())
}

/// Prints the variable catalog grouped by source.
pub fn run_variables(args: &CatalogArgs) -> Result<()> {
    let frame = load_frame(&args.data)?;
    let catalog = variable_catalog(&frame);
    match args.format {
        OutputFormatArg::Json => print_json(&catalog),
        OutputFormatArg::Table => {
            println!("{}", catalog_table(&catalog));
            Ok(())
        }
    }
}

/// Prints the options of every boundary filter field.
pub fn run_filters(args: &CatalogArgs) -> Result<()> {
    let frame = load_frame(&args.data)?;
    let metadata = filter_metadata(&frame);
    match args.format {
        OutputFormatArg::Json => print_json(&metadata),
        OutputFormatArg::Table => {
            println!(
                "Donors: {} total, {} with functional data",
                metadata.total_donors, metadata.donors_with_functional_data
            );
            println!("{}", filter_metadata_table(&metadata));
            Ok(())
        }
    }
}

/// Prints the analysis methods with their descriptions.
pub fn run_methods(args: &MethodsArgs) -> Result<()> {
    match args.format {
        OutputFormatArg::Json => {
            let methods: Vec<_> = AnalysisMethod::ALL
                .into_iter()
                .map(|method| {
                    json!({
                        "value": method.as_str(),
                        "label": method.label(),
                        "description": method.description(),
                    })
                })
                .collect();
            print_json(&methods)
        }
        OutputFormatArg::Table => {
            println!("{}", methods_table());
            Ok(())
        }
    }
}

fn filtered_frame(data: &DataArgs, criteria: Option<&str>) -> Result<AnalysisFrame> {
    let frame = load_frame(data)?;
    filter_frame(&frame, criteria)
}

fn filter_frame(frame: &AnalysisFrame, criteria: Option<&str>) -> Result<AnalysisFrame> {
    let criteria = criteria_from_arg(criteria)?;
    let filtered = apply(frame, &criteria).context("apply filter")?;
    info!(
        constraints = criteria.active_columns().len(),
        matched = filtered.height(),
        total = frame.height(),
        "filter applied"
    );
    Ok(filtered)
}

/// Prints the donors matching the filter criteria in the requested view.
pub fn run_filter(args: &FilterArgs) -> Result<()> {
    let filtered = filtered_frame(&args.data, args.criteria.as_deref())?;
    let ids = donor_ids(&filtered);
    for id in &ids {
        trace!(donor = redact_value(id), "donor matched");
    }

    let table = match args.view {
        FilterViewArg::Ids => {
            if args.format == OutputFormatArg::Json {
                return print_json(&json!({ "count": ids.len(), "donor_ids": ids }));
            }
            println!("{} donors", ids.len());
            for id in &ids {
                println!("{id}");
            }
            return Ok(());
        }
        FilterViewArg::Donors => donor_metadata(&filtered).context("donor view")?,
        FilterViewArg::Traits => trait_table(&filtered).context("trait view")?,
    };
    match args.format {
        OutputFormatArg::Json => print_json(&frame_records(&table)),
        OutputFormatArg::Table => {
            println!("{table}");
            Ok(())
        }
    }
}

fn request_parts(args: &AssociateArgs) -> (AssociationRequest, AnalysisOptions) {
    let request = association_request(
        &args.variables,
        &args.controls,
        &args.traits,
        args.method.as_deref(),
    );
    let mut options = AnalysisOptions::default();
    if let Some(min_samples) = args.min_samples {
        options.min_samples = min_samples;
    }
    (request, options)
}

/// Tests the requested variables against traits over the filtered donors.
pub fn run_associate(args: &AssociateArgs) -> Result<()> {
    let filtered = filtered_frame(&args.data, args.criteria.as_deref())?;
    let (request, options) = request_parts(args);
    let report = hipp_analysis::run(&filtered, &request, &options);
    print_report(&report, None, args)
}

/// Checks external data against all loaded donors, then tests it against
/// traits over the filtered donors unless `--validate-only` is given.
pub fn run_external(args: &ExternalArgs) -> Result<()> {
    let associate = &args.associate;
    let external = load_external(&args.external)?;
    info!(
        donors = external.donor_count(),
        variables = external.variable_names().len(),
        "external data loaded"
    );
    let frame = load_frame(&associate.data)?;
    let validation = validate_external(&frame, &external);
    if !validation.valid {
        warn!(
            unmatched = validation.unmatched_donors,
            inconsistent = validation.inconsistent_donors,
            "external data does not fully match the loaded donors"
        );
    }
    if args.validate_only {
        return match associate.format {
            OutputFormatArg::Json => print_json(&validation),
            OutputFormatArg::Table => {
                for line in validation_lines(&validation) {
                    println!("{line}");
                }
                Ok(())
            }
        };
    }

    let filtered = filter_frame(&frame, associate.criteria.as_deref())?;
    let (request, options) = request_parts(associate);
    let report = hipp_analysis::run_external(&filtered, &external, &request, &options)
        .context("merge external data")?;
    print_report(&report, Some(&validation), associate)
}

fn print_report(
    report: &AssociationReport,
    validation: Option<&ExternalValidation>,
    args: &AssociateArgs,
) -> Result<()> {
    let adjusted = args.fdr.then(|| report.adjusted_p_values());
    match args.format {
        OutputFormatArg::Json => {
            let mut output = json!({
                "results": report.results().collect::<Vec<_>>(),
                "summary": report.summary,
            });
            if let Some(validation) = validation {
                output["validation"] = json!(validation);
            }
            if let Some(adjusted) = &adjusted {
                output["adjusted_p_values"] = json!(adjusted);
            }
            if args.show_skipped {
                output["evaluations"] = json!(report.evaluations);
            }
            print_json(&output)
        }
        OutputFormatArg::Table => {
            let validation = validation.map(validation_lines).unwrap_or_default();
            for line in validation.iter().chain(&summary_lines(&report.summary)) {
                println!("{line}");
            }
            println!("{}", results_table(report, adjusted.as_deref()));
            if args.show_skipped
                && let Some(table) = exclusions_table(report)
            {
                println!("{table}");
            }
            Ok(())
        }
    }
}
