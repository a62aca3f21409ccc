use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Field separator of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
}

impl SourceFormat {
    /// `.csv` is comma separated; `.txt` and `.tsv` are tab separated.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Tsv,
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Raw text cells of a delimited file.
#[derive(Debug, Clone, Default)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DelimitedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a delimited file with a single header row.
///
/// Headers and cells are trimmed. Short rows are padded with empty cells and
/// rows with no content are dropped.
pub fn read_delimited(path: &Path, format: SourceFormat) -> Result<DelimitedTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| IngestError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|err| IngestError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?
            .iter()
            .map(normalize_cell)
            .collect(),
        None => {
            return Err(IngestError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|err| IngestError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row: Vec<String> = (0..headers.len())
            .map(|idx| record.get(idx).map(normalize_cell).unwrap_or_default())
            .collect();
        rows.push(row);
    }
    Ok(DelimitedTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("traits/HIPP_all_traits.CSV")),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("donor_metadata/donors.txt")),
            SourceFormat::Tsv
        );
    }

    #[test]
    fn rename_reports_missing_column() {
        let mut table = DelimitedTable {
            headers: vec!["Donor ID".into(), "AUC".into()],
            rows: Vec::new(),
        };
        assert!(table.rename_column("Donor ID", "RRID"));
        assert!(!table.rename_column("Donor ID", "RRID"));
        assert_eq!(table.column_index("RRID"), Some(0));
    }
}
