//! JSON request/response contract, exercised through the same path the
//! `score` binary takes.

use lendscore::adapters::threshold::ThresholdModel;
use lendscore::adapters::wire::{self, ErrorResponse, ScoreRequest, ScoreResponse};
use lendscore::application::ScoringService;
use lendscore::LendscoreError;
use serde_json::{json, Value};

fn to_value<T: serde::Serialize>(response: &T) -> Value {
    serde_json::to_value(response).expect("Should serialize")
}

fn score(body: &str) -> Result<Value, Value> {
    let service = ScoringService::new(ThresholdModel::new());
    let outcome = ScoreRequest::from_json(body)
        .and_then(|request| service.evaluate_raw(&request.features));

    match outcome {
        Ok((_, result)) => Ok(to_value(&ScoreResponse::from(&result))),
        Err(LendscoreError::Validation(e)) => Err(to_value(&ErrorResponse::from(&e))),
        Err(e) => Err(to_value(&ErrorResponse::malformed(e.to_string()))),
    }
}

#[test]
fn test_empty_request_scores_defaults() {
    let response = score("{}").expect("Should score");
    assert_eq!(response["risk_level"], json!("Moderate Risk"));
    assert_eq!(response["eligibility"], json!("Approved"));
    assert_eq!(
        response["eligibility_message"],
        json!("This application meets our lending criteria and is approved.")
    );
    assert_eq!(response["risk_factors"], json!([]));
    assert_eq!(response["model_confidence"], json!(100));
}

#[test]
fn test_high_risk_request() {
    let body = json!({
        "CREDIT_SCORE_AVG_CALC": 550,
        "DELINQ_CNT_30_DAY_TOTAL": 2,
        "FE_DEBT_TO_INCOME": 0.5,
        "LTV_FRONT": 1.2,
        "FE_TOTAL_INCOME": 40000,
        "REVOLVING_UTILIZATION_TAGGED_TOTAL": 0.85,
        "PAYMENT_MADE_CNT_TOTAL": 6
    })
    .to_string();

    let response = score(&body).expect("Should score");
    let probability = response["default_probability"]
        .as_f64()
        .expect("Should be a number");
    assert!((probability - 0.85).abs() < 1e-9);
    assert_eq!(response["risk_level"], json!("Very High Risk"));
    assert_eq!(response["eligibility"], json!("Declined"));
    assert_eq!(
        response["eligibility_message"],
        json!("This application does not meet our lending criteria.")
    );
    assert_eq!(
        response["risk_factors"],
        json!([
            "Low credit score",
            "Presence of delinquencies",
            "High debt-to-income ratio"
        ])
    );
    assert_eq!(response["model_confidence"], json!(70));
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let response = score(r#"{"CREDIT_SCORE_AVG_CALC": 100, "LTV_FRONT": 9.0}"#)
        .expect("Should score");
    let factors = response["risk_factors"].as_array().expect("Should be a list");
    assert!(factors.contains(&json!("Low credit score")));
    assert!(factors.contains(&json!("High loan-to-value ratio")));
}

#[test]
fn test_fractional_income_is_not_rounded() {
    // 50,000.4 is above the +0.02 fallback band; 50,000 is not
    let response = score(r#"{"FE_TOTAL_INCOME": 50000.4}"#).expect("Should score");
    let probability = response["default_probability"]
        .as_f64()
        .expect("Should be a number");
    assert!((probability - 0.15).abs() < 1e-9);
    assert_eq!(response["risk_level"], json!("Moderate Risk"));

    let response = score(r#"{"FE_TOTAL_INCOME": 50000}"#).expect("Should score");
    let probability = response["default_probability"]
        .as_f64()
        .expect("Should be a number");
    assert!((probability - 0.18).abs() < 1e-9);
}

#[test]
fn test_unknown_field_names_field() {
    let error = score(r#"{"CREDIT_SCORE": 700}"#).expect_err("Should reject");
    assert_eq!(error["error"], json!("validation"));
    assert_eq!(error["field"], json!("CREDIT_SCORE"));
}

#[test]
fn test_non_numeric_field_names_field() {
    let error = score(r#"{"FE_TOTAL_INCOME": "75k"}"#).expect_err("Should reject");
    assert_eq!(error["error"], json!("validation"));
    assert_eq!(error["field"], json!("FE_TOTAL_INCOME"));
}

#[test]
fn test_malformed_body() {
    let error = score("[700]").expect_err("Should reject");
    assert_eq!(error["error"], json!("malformed"));
    assert!(error.get("field").is_none());

    assert!(matches!(
        ScoreRequest::from_json("{\"LTV_FRONT\": "),
        Err(LendscoreError::Serialization(_))
    ));
}

#[test]
fn test_catalog_lists_every_feature() {
    let value = serde_json::to_value(wire::catalog()).expect("Should serialize");
    let entries = value.as_array().expect("Should be an array");
    assert_eq!(entries.len(), 30);
    for entry in entries {
        for key in ["name", "kind", "min", "max", "default", "step", "category", "description"] {
            assert!(entry.get(key).is_some(), "missing {key} in {entry}");
        }
    }
}
