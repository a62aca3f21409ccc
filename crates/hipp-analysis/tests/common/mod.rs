//! Cohort fixtures for association tests.
#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use hipp_core::{AnalysisFrame, build_analysis_frame};
use hipp_ingest::SourceTables;
use hipp_model::MergeOptions;

pub const AGE: &str = "Age (years)";
pub const BMI: &str = "BMI";
pub const GENDER: &str = "Gender";
pub const STATUS: &str = "Description of diabetes status";
pub const MULTI_AAB: &str = "Multi AAB";
pub const AUC: &str = "AUC_ins";
pub const SI: &str = "SI_gcg";

/// One donor with its trait values. Donor IDs are assigned by position.
#[derive(Debug, Clone, Default)]
pub struct Donor {
    pub age: Option<f64>,
    pub bmi: Option<f64>,
    pub gender: Option<&'static str>,
    pub status: Option<&'static str>,
    pub multi_aab: Option<bool>,
    pub auc: Option<f64>,
    pub si: Option<f64>,
}

pub fn donor_id(idx: usize) -> String {
    format!("D{}", idx + 1)
}

fn numbers(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn text(name: &str, values: Vec<Option<&str>>) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn frame_of(donors: &[Donor]) -> AnalysisFrame {
    let ids: Vec<String> = (0..donors.len()).map(donor_id).collect();
    let id_refs: Vec<Option<&str>> = ids.iter().map(|id| Some(id.as_str())).collect();

    let donor_table = DataFrame::new(vec![
        text("RRID", id_refs.clone()),
        numbers(AGE, donors.iter().map(|d| d.age).collect()),
        numbers(BMI, donors.iter().map(|d| d.bmi).collect()),
        text(GENDER, donors.iter().map(|d| d.gender).collect()),
        text(STATUS, donors.iter().map(|d| d.status).collect()),
        Series::new(
            MULTI_AAB.into(),
            donors.iter().map(|d| d.multi_aab).collect::<Vec<_>>(),
        )
        .into_column(),
    ])
    .expect("donor table");
    let trait_table = DataFrame::new(vec![
        text("RRID", id_refs),
        numbers(AUC, donors.iter().map(|d| d.auc).collect()),
        numbers(SI, donors.iter().map(|d| d.si).collect()),
    ])
    .expect("trait table");

    build_analysis_frame(
        &SourceTables::new(donor_table, trait_table),
        &MergeOptions::default(),
    )
    .expect("analysis frame")
}

/// `n` complete donors where AUC rises with age and is higher for males.
pub fn cohort(n: usize) -> Vec<Donor> {
    (0..n)
        .map(|i| {
            let age = 20.0 + ((i * 7) % 50) as f64;
            let male = i % 2 == 1;
            let noise = ((i * 13) % 4) as f64 * 0.1;
            Donor {
                age: Some(age),
                bmi: Some(18.0 + ((i * 3) % 15) as f64),
                gender: Some(if male { "Male" } else { "Female" }),
                status: Some(["Non-diabetic", "T1D", "T2D"][i % 3]),
                multi_aab: Some(i % 4 == 0),
                auc: Some(0.1 * age + if male { 0.3 } else { 0.0 } + noise),
                si: Some(1.0 + (i % 5) as f64 * 0.2),
            }
        })
        .collect()
}
