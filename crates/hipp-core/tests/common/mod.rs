//! Shared fixtures for hipp-core integration tests.
#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use hipp_core::{AnalysisFrame, build_analysis_frame};
use hipp_ingest::SourceTables;
use hipp_model::MergeOptions;

pub fn text(name: &str, values: &[Option<&str>]) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn numbers(name: &str, values: &[Option<f64>]) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn flags(name: &str, values: &[Option<bool>]) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn frame(columns: Vec<Column>) -> DataFrame {
    DataFrame::new(columns).expect("fixture frame")
}

/// Five donors; D4 has no trait record and T9 has no donor record.
pub fn donors() -> DataFrame {
    frame(vec![
        text("Accession", &[Some("A1"), Some("A2"), Some("A3"), Some("A4"), Some("A5")]),
        text("RRID", &[Some("D1"), Some("D2"), Some("D3"), Some("D4"), Some("D5")]),
        text("Gender", &[Some("Female"), Some("male"), None, Some("Female"), Some(" FEMALE ")]),
        numbers("Age (years)", &[Some(34.0), Some(61.0), Some(45.0), Some(20.0), None]),
        flags("Multi AAB", &[Some(false), Some(true), None, Some(false), Some(false)]),
    ])
}

pub fn traits() -> DataFrame {
    frame(vec![
        text("RRID", &[Some("D1"), Some("D2"), Some("D3"), Some("D5"), Some("T9")]),
        text("HPAP ID", &[Some("H1"), Some("H2"), Some("H3"), Some("H5"), Some("H9")]),
        numbers("AUC_ins", &[Some(1.5), Some(2.5), None, Some(0.5), Some(9.0)]),
        numbers("SI_gcg", &[Some(0.25), Some(0.75), Some(1.25), Some(2.0), Some(3.0)]),
    ])
}

/// Two biosamples for A1, one for A2, none for A3 and A5.
pub fn biosamples() -> DataFrame {
    frame(vec![
        text("Accession", &[Some("B1"), Some("B2"), Some("B3"), Some("B4")]),
        text("Donors", &[Some("A1"), Some("A1"), Some("A2"), Some("A9")]),
        numbers("Purity (Percentage)", &[Some(85.0), Some(60.0), Some(90.0), Some(10.0)]),
        text("Isolation_center", &[Some("Penn"), Some("Vanderbilt"), Some("Penn"), None]),
    ])
}

pub fn sources() -> SourceTables {
    SourceTables::new(donors(), traits()).with_biosamples(biosamples())
}

pub fn analysis_frame() -> AnalysisFrame {
    build_analysis_frame(&sources(), &MergeOptions::default()).expect("analysis frame")
}

/// Frame from donor and trait tables only.
pub fn frame_from(donors: DataFrame, traits: DataFrame) -> AnalysisFrame {
    build_analysis_frame(&SourceTables::new(donors, traits), &MergeOptions::default())
        .expect("analysis frame")
}

pub fn ids(frame: &AnalysisFrame) -> Vec<String> {
    hipp_core::donor_ids(frame)
}
