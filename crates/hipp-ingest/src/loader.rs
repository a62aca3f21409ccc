//! Source loaders with per-column coercion.
//!
//! Every cell starts as text. Known numeric and boolean columns are coerced
//! while building the frame; anything that fails to coerce becomes null, as
//! do the missing tokens recognised by [`hipp_common::is_missing_token`].

use std::path::Path;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{info, info_span, warn};

use hipp_common::{is_missing_token, parse_bool, parse_f64};
use hipp_model::columns::{
    BIOSAMPLE_BOOLEAN_COLUMNS, BIOSAMPLE_NUMERIC_COLUMNS, DONOR_BOOLEAN_COLUMNS,
    DONOR_NUMERIC_COLUMNS, RRID, TRAIT_DONOR_ID, TRAIT_IDENTIFIER_COLUMNS,
};

use crate::error::{IngestError, Result};
use crate::paths::DataPaths;
use crate::source::SourceTables;
use crate::table::{DelimitedTable, SourceFormat, read_delimited};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Text,
    Numeric,
    Boolean,
}

/// Which columns of a source are coerced to numbers or booleans.
#[derive(Debug, Clone, Default)]
pub struct ColumnCoercion {
    pub numeric: Vec<String>,
    pub boolean: Vec<String>,
    /// When set, every column not listed here is numeric.
    pub numeric_except: Option<Vec<String>>,
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_string()).collect()
}

impl ColumnCoercion {
    pub fn donors() -> Self {
        Self {
            numeric: owned(DONOR_NUMERIC_COLUMNS),
            boolean: owned(DONOR_BOOLEAN_COLUMNS),
            numeric_except: None,
        }
    }

    pub fn biosamples() -> Self {
        Self {
            numeric: owned(BIOSAMPLE_NUMERIC_COLUMNS),
            boolean: owned(BIOSAMPLE_BOOLEAN_COLUMNS),
            numeric_except: None,
        }
    }

    /// Trait files hold identifiers plus an open set of numeric traits.
    pub fn traits() -> Self {
        Self {
            numeric: Vec::new(),
            boolean: Vec::new(),
            numeric_except: Some(owned(TRAIT_IDENTIFIER_COLUMNS)),
        }
    }

    fn kind(&self, column: &str) -> CellKind {
        if self.boolean.iter().any(|name| name == column) {
            return CellKind::Boolean;
        }
        if self.numeric.iter().any(|name| name == column) {
            return CellKind::Numeric;
        }
        match &self.numeric_except {
            Some(except) if !except.iter().any(|name| name == column) => CellKind::Numeric,
            _ => CellKind::Text,
        }
    }
}

/// Builds a frame from raw cells, coercing columns per `coercion`.
///
/// Rows shorter than the header read their missing cells as empty.
pub fn table_to_frame(table: &DelimitedTable, coercion: &ColumnCoercion) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (idx, header) in table.headers.iter().enumerate() {
        let cells = table
            .rows
            .iter()
            .map(|row| row.get(idx).map_or("", String::as_str));
        let series = match coercion.kind(header) {
            CellKind::Numeric => {
                let values: Vec<Option<f64>> = cells.map(parse_f64).collect();
                Series::new(header.as_str().into(), values)
            }
            CellKind::Boolean => {
                let values: Vec<Option<bool>> = cells.map(parse_bool).collect();
                Series::new(header.as_str().into(), values)
            }
            CellKind::Text => {
                let values: Vec<Option<String>> = cells
                    .map(|cell| (!is_missing_token(cell)).then(|| cell.to_string()))
                    .collect();
                Series::new(header.as_str().into(), values)
            }
        };
        columns.push(series.into_column());
    }
    Ok(DataFrame::new(columns)?)
}

fn require_column(table: &DelimitedTable, column: &str, path: &Path) -> Result<()> {
    if table.column_index(column).is_none() {
        return Err(IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Loads the donor metadata source.
pub fn load_donors(path: &Path) -> Result<DataFrame> {
    let _span = info_span!("load", source = "donor").entered();
    let table = read_delimited(path, SourceFormat::from_path(path))?;
    require_column(&table, RRID, path)?;
    let df = table_to_frame(&table, &ColumnCoercion::donors())?;
    info!(rows = df.height(), columns = df.width(), "loaded donor records");
    Ok(df)
}

/// Loads the biosample metadata source.
pub fn load_biosamples(path: &Path) -> Result<DataFrame> {
    let _span = info_span!("load", source = "biosample").entered();
    let table = read_delimited(path, SourceFormat::from_path(path))?;
    let df = table_to_frame(&table, &ColumnCoercion::biosamples())?;
    info!(rows = df.height(), columns = df.width(), "loaded biosample records");
    Ok(df)
}

/// Loads the functional trait source, renaming `Donor ID` to `RRID`.
pub fn load_traits(path: &Path) -> Result<DataFrame> {
    let _span = info_span!("load", source = "trait").entered();
    let mut table = read_delimited(path, SourceFormat::from_path(path))?;
    if table.column_index(RRID).is_none() {
        table.rename_column(TRAIT_DONOR_ID, RRID);
    }
    require_column(&table, RRID, path)?;
    let df = table_to_frame(&table, &ColumnCoercion::traits())?;
    info!(rows = df.height(), traits = df.width() - 1, "loaded trait records");
    Ok(df)
}

/// Loads all three sources.
///
/// A mandatory source whose file does not exist is left absent so that the
/// merge reports it as a missing source. Any other failure of a mandatory
/// source is returned. The biosample source is optional: every failure is
/// logged and the source is left absent.
pub fn load_sources(paths: &DataPaths) -> Result<SourceTables> {
    let donors = load_mandatory(&paths.donors, load_donors)?;
    let traits = load_mandatory(&paths.traits, load_traits)?;
    let biosamples = match load_biosamples(&paths.biosamples) {
        Ok(df) => Some(df),
        Err(err) => {
            warn!(
                path = %paths.biosamples.display(),
                error = %err,
                "biosample source unavailable; biosample columns will be empty"
            );
            None
        }
    };
    Ok(SourceTables {
        donors,
        biosamples,
        traits,
    })
}

fn load_mandatory(
    path: &Path,
    load: impl FnOnce(&Path) -> Result<DataFrame>,
) -> Result<Option<DataFrame>> {
    match load(path) {
        Ok(df) => Ok(Some(df)),
        Err(IngestError::FileNotFound { path }) => {
            warn!(path = %path.display(), "mandatory source file not found");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{AnyValue, DataType};

    fn table(headers: &[&str], rows: &[&[&str]]) -> DelimitedTable {
        DelimitedTable {
            headers: owned(headers),
            rows: rows.iter().map(|row| owned(row)).collect(),
        }
    }

    #[test]
    fn coerces_known_donor_columns() {
        let table = table(
            &["RRID", "Age (years)", "Multi AAB", "Gender"],
            &[&["A", "34", "TRUE", "Female"], &["B", "-", "false", "-"]],
        );
        let df = table_to_frame(&table, &ColumnCoercion::donors()).expect("frame");

        assert_eq!(df.column("Age (years)").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Multi AAB").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("Gender").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Age (years)").unwrap().get(1).unwrap(), AnyValue::Null);
        assert_eq!(
            df.column("Multi AAB").unwrap().get(1).unwrap(),
            AnyValue::Boolean(false)
        );
        assert_eq!(df.column("Gender").unwrap().get(1).unwrap(), AnyValue::Null);
    }

    #[test]
    fn trait_columns_other_than_identifiers_are_numeric() {
        let table = table(
            &["RRID", "HPAP ID", "AUC_ins"],
            &[&["A", "HPAP-001", "1.5"], &["B", "HPAP-002", "oops"]],
        );
        let df = table_to_frame(&table, &ColumnCoercion::traits()).expect("frame");

        assert_eq!(df.column("HPAP ID").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("AUC_ins").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("AUC_ins").unwrap().null_count(), 1);
    }

    #[test]
    fn short_rows_read_missing_cells_as_null() {
        let table = table(
            &["RRID", "Age (years)", "Gender"],
            &[&["A", "34", "Female"], &["B"]],
        );
        let df = table_to_frame(&table, &ColumnCoercion::donors()).expect("frame");

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Age (years)").unwrap().get(1).unwrap(), AnyValue::Null);
        assert_eq!(df.column("Gender").unwrap().get(1).unwrap(), AnyValue::Null);
    }
}
