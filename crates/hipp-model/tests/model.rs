//! Tests for hipp-model types.

use hipp_model::columns::{AGE, GENDER};
use hipp_model::{
    AnalysisMethod, AssociationRequest, AssociationResult, AssociationSummary, ExternalVariableMap,
    FailureReason, FilterRequest, FilterValue, PairOutcome, RangeFilter, SkipReason,
};

fn result(method: AnalysisMethod) -> AssociationResult {
    AssociationResult {
        trait_name: "AUC_ins".to_string(),
        variable: AGE.to_string(),
        coefficient: 0.25,
        std_error: Some(0.5),
        p_value: 0.125,
        ci_lower: Some(-0.75),
        ci_upper: Some(1.25),
        r_squared: None,
        n_samples: 42,
        method,
    }
}

#[test]
fn filter_request_maps_boundary_names_to_columns() {
    let json = r#"{
        "gender": ["female"],
        "age_range": {"min": 18, "max": 65},
        "multi_aab": false,
        "bmi_range": null
    }"#;
    let request: FilterRequest = serde_json::from_str(json).expect("parse request");
    let conversion = request.to_criteria();

    assert!(conversion.ignored.is_empty());
    let criteria = conversion.criteria;
    assert_eq!(criteria.categorical[GENDER], vec!["female".to_string()]);
    assert_eq!(criteria.numerical[AGE], RangeFilter::between(18.0, 65.0));
    assert_eq!(criteria.boolean.get("Multi AAB"), Some(&false));
    assert_eq!(criteria.numerical.len(), 1);
}

#[test]
fn filter_request_collects_unknown_and_mismatched_fields() {
    let request = FilterRequest::new()
        .with("favourite_colour", FilterValue::Values(vec!["red".into()]))
        .with("age_range", FilterValue::Flag(true))
        .with("collections", FilterValue::Values(vec!["HPAP".into()]));
    let conversion = request.to_criteria();

    assert_eq!(conversion.ignored, vec!["age_range", "favourite_colour"]);
    assert_eq!(conversion.criteria.active_columns(), vec!["Collections"]);
}

#[test]
fn analysis_method_deserialization_is_lenient() {
    let request: AssociationRequest = serde_json::from_str(
        r#"{"variables": ["Age (years)"], "method": "logistic_regression"}"#,
    )
    .expect("parse request");
    assert_eq!(request.analysis_method, AnalysisMethod::LinearRegression);
    assert!(request.control_variables.is_empty());
    assert!(request.traits.is_none());

    let request: AssociationRequest = serde_json::from_str(
        r#"{"variables_of_interest": ["BMI"], "analysis_method": "kruskal_wallis", "traits": ["SI"]}"#,
    )
    .expect("parse request");
    assert_eq!(request.analysis_method, AnalysisMethod::KruskalWallis);
    assert_eq!(request.traits.as_deref(), Some(&["SI".to_string()][..]));
}

#[test]
fn analysis_method_strict_parsing_rejects_unknown_names() {
    assert_eq!(
        "kruskal-wallis".parse::<AnalysisMethod>().ok(),
        Some(AnalysisMethod::KruskalWallis)
    );
    assert_eq!(
        "ANOVA".parse::<AnalysisMethod>().ok(),
        Some(AnalysisMethod::Anova)
    );
    assert!("logistic_regression".parse::<AnalysisMethod>().is_err());
}

#[test]
fn every_method_has_a_label_and_description() {
    assert_eq!(AnalysisMethod::KruskalWallis.label(), "Kruskal-Wallis H-test");
    assert_eq!(AnalysisMethod::Correlation.label(), "Pearson Correlation");
    for method in AnalysisMethod::ALL {
        assert!(!method.label().is_empty());
        assert!(method.description().contains("use for"));
    }
}

#[test]
fn association_result_serializes_trait_field() {
    let json = serde_json::to_string_pretty(&result(AnalysisMethod::Correlation))
        .expect("serialize result");
    insta::assert_snapshot!(json, @r#"
    {
      "trait": "AUC_ins",
      "variable": "Age (years)",
      "coefficient": 0.25,
      "std_error": 0.5,
      "p_value": 0.125,
      "ci_lower": -0.75,
      "ci_upper": 1.25,
      "r_squared": null,
      "n_samples": 42,
      "method": "correlation"
    }
    "#);
}

#[test]
fn pair_outcome_serializes_with_status_tag() {
    let skipped = PairOutcome::Skipped(SkipReason::InsufficientSamples {
        available: 7,
        required: 10,
    });
    let json = serde_json::to_string(&skipped).expect("serialize outcome");
    insta::assert_snapshot!(json, @r#"{"status":"skipped","detail":{"reason":"insufficient_samples","available":7,"required":10}}"#);

    let failed = PairOutcome::Failed(FailureReason::SingularDesign);
    let json = serde_json::to_string(&failed).expect("serialize outcome");
    insta::assert_snapshot!(json, @r#"{"status":"failed","detail":{"reason":"singular_design"}}"#);
}

#[test]
fn summary_tallies_outcomes_by_reason() {
    let mut summary = AssociationSummary::default();
    summary.record(&PairOutcome::Success(result(AnalysisMethod::Anova)));
    summary.record(&PairOutcome::Skipped(SkipReason::UnknownTrait {
        name: "nope".into(),
    }));
    summary.record(&PairOutcome::Skipped(SkipReason::UnknownTrait {
        name: "other".into(),
    }));
    summary.record(&PairOutcome::Failed(FailureReason::ZeroVariance));

    assert_eq!(summary.pairs_succeeded, 1);
    assert_eq!(summary.pairs_skipped(), 2);
    assert_eq!(summary.pairs_failed(), 1);
    assert_eq!(summary.skipped["unknown_trait"], 2);
    assert_eq!(summary.failed["zero_variance"], 1);
}

#[test]
fn external_map_lists_sorted_variable_union() {
    let map: ExternalVariableMap = serde_json::from_str(
        r#"{
            "RRID:SAMN1": {"score": 1.5, "alpha": 2.0},
            "RRID:SAMN2": {"beta": 0.5}
        }"#,
    )
    .expect("parse map");

    assert_eq!(map.donor_count(), 2);
    assert_eq!(map.variable_names(), vec!["alpha", "beta", "score"]);
    assert_eq!(map.value("RRID:SAMN2", "beta"), Some(0.5));
    assert_eq!(map.value("RRID:SAMN2", "score"), None);
}

#[test]
fn request_builder_sets_all_parts() {
    let request = AssociationRequest::new([AGE])
        .with_controls(["BMI"])
        .with_traits(["AUC_ins"])
        .with_method(AnalysisMethod::Correlation);
    assert_eq!(request.variables_of_interest, vec![AGE.to_string()]);
    assert_eq!(request.control_variables, vec!["BMI".to_string()]);
    assert_eq!(request.analysis_method, AnalysisMethod::Correlation);
}
