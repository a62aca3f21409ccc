//! Filter engine behaviour.

mod common;

use std::collections::BTreeSet;

use polars::prelude::AnyValue;
use proptest::prelude::*;

use hipp_common::{any_to_f64, any_to_string};
use hipp_core::{AnalysisFrame, apply};
use hipp_model::columns::{AGE, GENDER};
use hipp_model::{FilterCriteria, FilterRequest, RangeFilter};

use common::{analysis_frame, flags, frame, frame_from, ids, numbers, text};

/// 500 donors with trait data; exactly 210 are female and aged 18 to 65.
fn cohort() -> AnalysisFrame {
    let n = 500;
    let mut rrid = Vec::with_capacity(n);
    let mut gender = Vec::with_capacity(n);
    let mut age = Vec::with_capacity(n);
    let spellings = ["female", "Female", " FEMALE "];
    let out_of_range = [Some(17.9), Some(65.5), None, Some(80.0)];
    for i in 0..n {
        rrid.push(format!("RRID:{i:04}"));
        let (g, a) = match i {
            0..210 => (Some(spellings[i % 3]), Some(18.0 + (i % 48) as f64)),
            210..300 => (Some("Female"), out_of_range[i % 4]),
            300..450 => (Some("Male"), Some(30.0)),
            _ => (None, Some(40.0)),
        };
        gender.push(g);
        age.push(a);
    }
    let rrid_refs: Vec<Option<&str>> = rrid.iter().map(|id| Some(id.as_str())).collect();
    let donors = frame(vec![
        text("RRID", &rrid_refs),
        text(GENDER, &gender),
        numbers(AGE, &age),
    ]);
    let traits = frame(vec![
        text("RRID", &rrid_refs),
        numbers("AUC_ins", &vec![Some(1.0); n]),
    ]);
    frame_from(donors, traits)
}

#[test]
fn female_adults_are_selected_case_insensitively() {
    let cohort = cohort();
    assert_eq!(cohort.height(), 500);
    let request: FilterRequest =
        serde_json::from_str(r#"{"gender": ["female"], "age_range": {"min": 18, "max": 65}}"#)
            .expect("request");
    let conversion = request.to_criteria();

    let filtered = apply(&cohort, &conversion.criteria).expect("filter");
    assert_eq!(filtered.height(), 210);

    let gender = filtered.data().column(GENDER).expect("gender");
    let age = filtered.data().column(AGE).expect("age");
    for idx in 0..filtered.height() {
        let g = any_to_string(gender.get(idx).expect("gender value"));
        assert_eq!(g.to_lowercase(), "female");
        let a = any_to_f64(age.get(idx).expect("age value")).expect("age present");
        assert!((18.0..=65.0).contains(&a));
    }
}

#[test]
fn null_never_matches_an_active_constraint() {
    let frame = analysis_frame();

    let by_age = FilterCriteria::new().with_range(AGE, RangeFilter::new(None, Some(1000.0)));
    assert_eq!(ids(&apply(&frame, &by_age).expect("filter")), vec!["D1", "D2", "D3"]);

    let by_flag = FilterCriteria::new().with_flag("Multi AAB", false);
    assert_eq!(ids(&apply(&frame, &by_flag).expect("filter")), vec!["D1", "D5"]);

    let by_gender = FilterCriteria::new().with_categorical(GENDER, ["FEMALE", "Male"]);
    assert_eq!(
        ids(&apply(&frame, &by_gender).expect("filter")),
        vec!["D1", "D2", "D5"]
    );
}

#[test]
fn biosample_columns_filter_like_any_other() {
    let frame = analysis_frame();
    let criteria = FilterCriteria::new()
        .with_categorical("biosample_Isolation_center", ["penn"])
        .with_range("biosample_Purity (Percentage)", RangeFilter::new(Some(86.0), None));
    assert_eq!(ids(&apply(&frame, &criteria).expect("filter")), vec!["D2"]);
}

#[test]
fn unknown_columns_impose_no_constraint() {
    let frame = analysis_frame();
    let criteria = FilterCriteria::new()
        .with_categorical("Eye colour", ["blue"])
        .with_range("Height", RangeFilter::between(0.0, 1.0))
        .with_flag("Smoker", true);
    let filtered = apply(&frame, &criteria).expect("filter");
    assert_eq!(filtered.height(), frame.height());
}

#[test]
fn empty_result_keeps_schema() {
    let frame = analysis_frame();
    let criteria = FilterCriteria::new().with_range(AGE, RangeFilter::between(90.0, 99.0));
    let filtered = apply(&frame, &criteria).expect("filter");
    assert!(filtered.is_empty());
    assert_eq!(filtered.data().width(), frame.data().width());
    assert_eq!(filtered.trait_columns(), frame.trait_columns());
}

fn random_frame(rows: &[(u8, Option<u8>, Option<bool>)]) -> AnalysisFrame {
    let ids: Vec<String> = (0..rows.len()).map(|idx| format!("D{idx}")).collect();
    let id_refs: Vec<Option<&str>> = ids.iter().map(|id| Some(id.as_str())).collect();
    let genders = ["female", "male", "Female", "-"];
    let gender: Vec<Option<&str>> = rows
        .iter()
        .map(|(g, _, _)| Some(genders[*g as usize % genders.len()]))
        .collect();
    let age: Vec<Option<f64>> = rows.iter().map(|(_, a, _)| a.map(f64::from)).collect();
    let flag: Vec<Option<bool>> = rows.iter().map(|(_, _, f)| *f).collect();
    let donors = frame(vec![
        text("RRID", &id_refs),
        text(GENDER, &gender),
        numbers(AGE, &age),
        flags("Multi AAB", &flag),
    ]);
    let traits = frame(vec![
        text("RRID", &id_refs),
        numbers("AUC_ins", &vec![Some(1.0); rows.len()]),
    ]);
    frame_from(donors, traits)
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::subsequence(vec!["female", "MALE", "other"], 1..3)),
        prop::option::of((prop::option::of(0u8..100), prop::option::of(0u8..100))),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(genders, range, flag)| {
            let mut criteria = FilterCriteria::new();
            if let Some(genders) = genders {
                criteria = criteria.with_categorical(GENDER, genders);
            }
            if let Some((min, max)) = range {
                criteria = criteria.with_range(
                    AGE,
                    RangeFilter::new(min.map(f64::from), max.map(f64::from)),
                );
            }
            if let Some(flag) = flag {
                criteria = criteria.with_flag("Multi AAB", flag);
            }
            criteria
        })
}

/// Adds every group of `extra` that `base` does not already constrain.
fn tighten(base: &FilterCriteria, extra: &FilterCriteria) -> FilterCriteria {
    let mut tightened = base.clone();
    for (column, values) in &extra.categorical {
        tightened
            .categorical
            .entry(column.clone())
            .or_insert_with(|| values.clone());
    }
    for (column, range) in &extra.numerical {
        tightened.numerical.entry(column.clone()).or_insert(*range);
    }
    for (column, flag) in &extra.boolean {
        tightened.boolean.entry(column.clone()).or_insert(*flag);
    }
    tightened
}

proptest! {
    #[test]
    fn adding_constraints_never_adds_rows(
        rows in prop::collection::vec(
            (0u8..4, prop::option::of(0u8..100), prop::option::of(any::<bool>())),
            0..40,
        ),
        base in criteria_strategy(),
        extra in criteria_strategy(),
    ) {
        let frame = random_frame(&rows);
        let tightened = tighten(&base, &extra);
        let loose: BTreeSet<String> = ids(&apply(&frame, &base).expect("filter")).into_iter().collect();
        let strict: BTreeSet<String> = ids(&apply(&frame, &tightened).expect("filter")).into_iter().collect();
        prop_assert!(strict.is_subset(&loose));
    }

    #[test]
    fn active_range_excludes_missing_ages(
        rows in prop::collection::vec(
            (0u8..4, prop::option::of(0u8..100), prop::option::of(any::<bool>())),
            1..40,
        ),
        min in prop::option::of(0u8..100),
        max in prop::option::of(0u8..100),
    ) {
        prop_assume!(min.is_some() || max.is_some());
        let frame = random_frame(&rows);
        let criteria = FilterCriteria::new()
            .with_range(AGE, RangeFilter::new(min.map(f64::from), max.map(f64::from)));
        let filtered = apply(&frame, &criteria).expect("filter");
        let age = filtered.data().column(AGE).expect("age");
        for idx in 0..filtered.height() {
            prop_assert_ne!(age.get(idx).expect("age value"), AnyValue::Null);
        }
    }
}
