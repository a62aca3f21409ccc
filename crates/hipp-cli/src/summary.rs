//! Rendering of command output as tables and JSON records.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use polars::prelude::{AnyValue, DataFrame, DataType};
use serde_json::{Map, Value};

use hipp_analysis::AssociationReport;
use hipp_common::{any_is_missing, any_to_bool, any_to_f64, any_to_string};
use hipp_model::{
    AnalysisMethod, AssociationResult, AssociationSummary, ExternalValidation, FilterMetadata,
    PairOutcome, VariableCatalog, VariableDescriptor,
};

/// Values listed per categorical variable before eliding the rest.
const VALUE_PREVIEW: usize = 5;

pub fn catalog_table(catalog: &VariableCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Source"),
        header_cell("Type"),
        header_cell("Values / range"),
    ]);
    apply_table_style(&mut table);
    for descriptor in catalog.iter() {
        table.add_row(vec![
            Cell::new(&descriptor.name).add_attribute(Attribute::Bold),
            Cell::new(descriptor.source.as_str()),
            Cell::new(descriptor.kind.as_str()),
            Cell::new(describe_values(descriptor)),
        ]);
    }
    table
}

fn describe_values(descriptor: &VariableDescriptor) -> String {
    if let Some(values) = &descriptor.unique_values {
        let mut shown: Vec<&str> = values
            .iter()
            .take(VALUE_PREVIEW)
            .map(String::as_str)
            .collect();
        if values.len() > VALUE_PREVIEW {
            shown.push("…");
        }
        return shown.join(", ");
    }
    if let Some(range) = &descriptor.range {
        return match (range.min, range.max) {
            (Some(min), Some(max)) => format!("{} – {}", format_number(min), format_number(max)),
            _ => "-".to_string(),
        };
    }
    descriptor.description.clone().unwrap_or_default()
}

pub fn filter_metadata_table(metadata: &FilterMetadata) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter column"), header_cell("Options")]);
    apply_table_style(&mut table);
    for (column, options) in &metadata.categorical_filters {
        table.add_row(vec![Cell::new(column), Cell::new(options.join(", "))]);
    }
    for (column, bounds) in &metadata.numerical_filters {
        table.add_row(vec![
            Cell::new(column),
            Cell::new(format!(
                "{} – {}",
                format_number(bounds.min),
                format_number(bounds.max)
            )),
        ]);
    }
    table
}

/// One row per analysis method.
pub fn methods_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Method"),
        header_cell("Name"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for method in AnalysisMethod::ALL {
        table.add_row(vec![
            Cell::new(method.as_str()).add_attribute(Attribute::Bold),
            Cell::new(method.label()),
            Cell::new(method.description()),
        ]);
    }
    table
}

/// Successful results, optionally with Benjamini-Hochberg q-values.
pub fn results_table(report: &AssociationReport, adjusted: Option<&[f64]>) -> Table {
    let mut header = vec![
        header_cell("Trait"),
        header_cell("Variable"),
        header_cell("Method"),
        header_cell("Coefficient"),
        header_cell("Std. error"),
        header_cell("95% CI"),
        header_cell("p"),
    ];
    if adjusted.is_some() {
        header.push(header_cell("q (BH)"));
    }
    header.push(header_cell("R²"));
    header.push(header_cell("N"));

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for (idx, result) in report.results().enumerate() {
        let mut row = vec![
            Cell::new(&result.trait_name),
            Cell::new(&result.variable),
            Cell::new(result.method.as_str()),
            Cell::new(format_number(result.coefficient)),
            optional_cell(result.std_error),
            interval_cell(result),
            p_value_cell(result.p_value),
        ];
        if let Some(adjusted) = adjusted {
            row.push(match adjusted.get(idx) {
                Some(&q) => p_value_cell(q),
                None => dim_cell("-"),
            });
        }
        row.push(optional_cell(result.r_squared));
        row.push(Cell::new(result.n_samples));
        table.add_row(row);
    }
    let columns = table.column_count();
    for index in 3..columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Pairs that were skipped or failed, with the reason.
pub fn exclusions_table(report: &AssociationReport) -> Option<Table> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Trait"),
        header_cell("Variable"),
        header_cell("Status"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    let mut rows = 0;
    for evaluation in &report.evaluations {
        let (status, reason) = match &evaluation.outcome {
            PairOutcome::Success(_) => continue,
            PairOutcome::Skipped(reason) => {
                (Cell::new("skipped").fg(Color::Yellow), reason.to_string())
            }
            PairOutcome::Failed(reason) => (Cell::new("failed").fg(Color::Red), reason.to_string()),
        };
        table.add_row(vec![
            Cell::new(&evaluation.trait_name),
            Cell::new(&evaluation.variable),
            status,
            Cell::new(reason),
        ]);
        rows += 1;
    }
    (rows > 0).then_some(table)
}

/// One line per summary fact.
pub fn summary_lines(summary: &AssociationSummary) -> Vec<String> {
    let mut lines = vec![format!("Samples: {}", summary.n_samples)];
    if let Some(message) = &summary.message {
        lines.push(format!("Note: {message}"));
    }
    lines.push(format!(
        "Traits analysed: {}, variables analysed: {}",
        summary.traits_analyzed, summary.variables_analyzed
    ));
    if let Some(names) = &summary.external_variables {
        lines.push(format!("External variables: {}", names.join(", ")));
    }
    lines.push(format!(
        "Pairs: {} succeeded, {} skipped, {} failed",
        summary.pairs_succeeded,
        summary.pairs_skipped(),
        summary.pairs_failed()
    ));
    for (code, count) in summary.skipped.iter().chain(&summary.failed) {
        lines.push(format!("  {code}: {count}"));
    }
    lines
}

/// External data check as text lines.
pub fn validation_lines(validation: &ExternalValidation) -> Vec<String> {
    let mut lines = vec![format!(
        "External data: {} donors supplied, {} matched, {} unmatched, {} with missing variables",
        validation.total_provided,
        validation.matching_donors,
        validation.unmatched_donors,
        validation.inconsistent_donors
    )];
    lines.push(format!("Variables: {}", validation.variables.join(", ")));
    if !validation.unmatched_ids.is_empty() {
        lines.push(format!("Unmatched: {}", validation.unmatched_ids.join(", ")));
    }
    if !validation.inconsistent_ids.is_empty() {
        lines.push(format!(
            "Missing variables: {}",
            validation.inconsistent_ids.join(", ")
        ));
    }
    lines.push(if validation.valid { "Valid: yes" } else { "Valid: no" }.to_string());
    lines
}

/// Rows of `df` as JSON objects; numeric and boolean columns keep their type.
pub fn frame_records(df: &DataFrame) -> Vec<Map<String, Value>> {
    let mut records = vec![Map::new(); df.height()];
    for column in df.get_columns() {
        let numeric = column.dtype().is_float() || column.dtype().is_integer();
        let boolean = column.dtype() == &DataType::Boolean;
        for (idx, record) in records.iter_mut().enumerate() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            let json = if any_is_missing(&value) {
                Value::Null
            } else if numeric {
                any_to_f64(value).map_or(Value::Null, Value::from)
            } else if boolean {
                any_to_bool(value).map_or(Value::Null, Value::Bool)
            } else {
                Value::String(any_to_string(value))
            };
            record.insert(column.name().to_string(), json);
        }
    }
    records
}

/// Fixed four-decimal rendering; scientific notation for tiny magnitudes.
pub fn format_number(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        format!("{value:.2e}")
    } else {
        format!("{value:.4}")
    }
}

fn p_value_cell(p: f64) -> Cell {
    let cell = Cell::new(format_number(p));
    if p < 0.05 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_number(value)),
        None => dim_cell("-"),
    }
}

fn interval_cell(result: &AssociationResult) -> Cell {
    match (result.ci_lower, result.ci_upper) {
        (Some(lower), Some(upper)) => Cell::new(format!(
            "[{}, {}]",
            format_number(lower),
            format_number(upper)
        )),
        _ => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
