//! Loading source files from disk.

use std::fs;
use std::path::Path;

use polars::prelude::{AnyValue, DataType};
use tempfile::TempDir;

use hipp_ingest::{
    DataPaths, IngestError, SourceFormat, SourceRegistry, load_donors, load_sources, load_traits,
    read_delimited,
};
use hipp_model::SourceKind;

const DONORS: &str = "Accession\tRRID\tAge (years)\tGender\tMulti AAB\n\
DON1\tRRID:SAMN1\t34\tFemale\tFALSE\n\
DON2\tRRID:SAMN2\t-\tMale\tTRUE\n\
\t\t\t\t\n";

const BIOSAMPLES: &str = "Accession\tDonors\tPurity (Percentage)\tIslet Histology\n\
BIO1\tDON1\t85\tTRUE\n\
BIO2\tDON1\t70\tFALSE\n";

const TRAITS: &str = "Donor ID,HPAP ID,AUC_ins,SI_gcg\n\
RRID:SAMN1,HPAP-001,1.25,0.5\n\
RRID:SAMN2,HPAP-002,,2\n";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dir");
    }
    fs::write(path, contents).expect("write file");
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let paths = DataPaths::from_root(dir.path());
    write(&paths.donors, DONORS);
    write(&paths.biosamples, BIOSAMPLES);
    write(&paths.traits, TRAITS);
    dir
}

#[test]
fn reads_tab_separated_rows_and_skips_blank_lines() {
    let dir = data_dir();
    let paths = DataPaths::from_root(dir.path());
    let table = read_delimited(&paths.donors, SourceFormat::Tsv).expect("read donors");

    assert_eq!(table.headers.len(), 5);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][2], "-");
}

#[test]
fn donors_are_coerced() {
    let dir = data_dir();
    let df = load_donors(&DataPaths::from_root(dir.path()).donors).expect("load donors");

    assert_eq!(df.height(), 2);
    let age = df.column("Age (years)").expect("age");
    assert_eq!(age.dtype(), &DataType::Float64);
    assert_eq!(age.get(0).expect("row"), AnyValue::Float64(34.0));
    assert_eq!(age.get(1).expect("row"), AnyValue::Null);
    assert_eq!(
        df.column("Multi AAB").expect("flag").get(1).expect("row"),
        AnyValue::Boolean(true)
    );
}

#[test]
fn trait_identifier_is_renamed() {
    let dir = data_dir();
    let df = load_traits(&DataPaths::from_root(dir.path()).traits).expect("load traits");

    assert!(df.column("RRID").is_ok());
    assert!(df.column("Donor ID").is_err());
    let auc = df.column("AUC_ins").expect("trait");
    assert_eq!(auc.dtype(), &DataType::Float64);
    assert_eq!(auc.null_count(), 1);
    assert_eq!(df.column("HPAP ID").expect("id").dtype(), &DataType::String);
}

#[test]
fn missing_identifier_column_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("traits.csv");
    write(&path, "Sample,AUC_ins\nA,1\n");

    let err = load_traits(&path).expect_err("missing RRID");
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "RRID"));
}

#[test]
fn load_sources_reads_all_three() {
    let dir = data_dir();
    let sources = load_sources(&DataPaths::from_root(dir.path())).expect("load sources");

    assert_eq!(sources.donors().map(|df| df.height()), Some(2));
    assert_eq!(sources.biosamples().map(|df| df.height()), Some(2));
    assert_eq!(sources.source(SourceKind::Trait).map(|df| df.height()), Some(2));
}

#[test]
fn absent_files_leave_sources_empty() {
    let dir = data_dir();
    let paths = DataPaths::from_root(dir.path())
        .with_biosamples(dir.path().join("nope.txt"))
        .with_donors(dir.path().join("missing.txt"));
    let sources = load_sources(&paths).expect("load sources");

    assert!(sources.donors().is_none());
    assert!(sources.biosamples().is_none());
    assert!(sources.traits().is_some());
}

#[test]
fn empty_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("donors.txt");
    write(&path, "");

    let err = load_donors(&path).expect_err("empty file");
    assert!(matches!(err, IngestError::EmptyFile { .. }));
}
