// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the success prediction endpoint

mod fixtures;

use api::{Server, ServerConfig, ServerError, ShutdownConfig};
use axum::http::StatusCode;
use fixtures::{TRAINING_COLUMNS, start_server, start_server_with_columns, write_artifacts};
use serde_json::{Value, json};
use tempfile::TempDir;

fn idea(category: &str) -> Value {
    json!({
        "launchCost": 1000,
        "expectedROI": 2.5,
        "creatorExperienceLevel": 3,
        "productCategory": category,
        "trendAlignment": true,
        "customerValidation": true
    })
}

#[tokio::test]
async fn known_category_is_scored() {
    let server = start_server(|_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&idea("Tech"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let probability = body["success_prediction"]
        .as_f64()
        .expect("success_prediction is a number");

    assert!((0.0..=1.0).contains(&probability));
    // Leaves [4, 16], [3, 17] and [6, 14] averaged
    assert!((probability - (0.8 + 0.85 + 0.7) / 3.0).abs() < 1e-9);

    let input = &body["input_data"];
    assert_eq!(input["productCategory_Tech"], json!(1));
    assert_eq!(input["productCategory_Finance"], json!(0));
    assert_eq!(input["productCategory_Healthcare"], json!(0));
    assert_eq!(input["productCategory_Retail"], json!(0));
    assert_eq!(input["trendAlignment"], json!(true));
    assert_eq!(input["launchCost"], json!(1000.0));
    assert!(input.get("productCategory").is_none());
}

#[tokio::test]
async fn unknown_category_encodes_all_zero() {
    let server = start_server(|_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&idea("Unknown"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let input = body["input_data"].as_object().expect("input_data is an object");

    let indicators: Vec<&Value> = input
        .iter()
        .filter(|(name, _)| name.starts_with("productCategory_"))
        .map(|(_, value)| value)
        .collect();
    assert_eq!(indicators.len(), 4);
    assert!(indicators.iter().all(|value| **value == json!(0)));

    let probability = body["success_prediction"].as_f64().expect("number");
    assert!((0.0..=1.0).contains(&probability));
}

#[tokio::test]
async fn echoed_input_follows_schema_order() {
    let server = start_server(|_| {}).await;

    let text = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&idea("Retail"))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read response");

    let positions: Vec<usize> = TRAINING_COLUMNS
        .iter()
        .map(|column| {
            text.find(&format!("\"{column}\""))
                .unwrap_or_else(|| panic!("{column} missing from {text}"))
        })
        .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn strict_mode_rejects_unknown_category() {
    let server = start_server(|config| config.model.reject_unknown_category = true).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&idea("Gaming"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["error"]
            .as_str()
            .expect("error is a string")
            .contains("Gaming")
    );
}

#[tokio::test]
async fn schema_mismatch_returns_error_not_probability() {
    let mut columns = TRAINING_COLUMNS;
    columns[8] = "productCategory_Gaming";
    let server = start_server_with_columns(&columns, |_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&idea("Tech"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.expect("Failed to parse response");
    let error = body["error"].as_str().expect("error is a string");
    assert!(!error.is_empty());
    assert!(error.contains("productCategory_Gaming"));
    assert!(error.contains("productCategory_Tech"));
    assert!(body.get("success_prediction").is_none());
}

#[tokio::test]
async fn schema_length_disagreeing_with_model_fails_startup() {
    let artifacts = TempDir::new().expect("Failed to create artifact dir");
    let mut config = ServerConfig::for_testing();
    config.model = write_artifacts(&artifacts, &TRAINING_COLUMNS[..8]);

    let err = Server::new(config, ShutdownConfig::default())
        .await
        .expect_err("startup should fail");

    assert!(matches!(err, ServerError::Initialization { .. }));
    assert!(err.to_string().contains("model expects 9"));
}

#[tokio::test]
async fn missing_field_is_unprocessable() {
    let server = start_server(|_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .json(&json!({ "launchCost": 1000, "productCategory": "Tech" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().expect("error").contains("missing"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let server = start_server(|_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .header("content-type", "application/json")
        .body(r#"{"launchCost": 1000,, }"#)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let server = start_server(|_| {}).await;

    let response = reqwest::Client::new()
        .post(server.url("/predict-success"))
        .header("x-request-id", "test-request-42")
        .json(&idea("Finance"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok()),
        Some("test-request-42")
    );
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let server = start_server(|_| {}).await;

    let response = reqwest::get(server.url("/health"))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], json!("Up"));
    assert_eq!(body["environment"], json!("testing"));
    assert_eq!(body["model"]["features"], json!(TRAINING_COLUMNS));
    assert_eq!(
        body["model"]["classifier"],
        json!("random forest (3 trees, 9 features)")
    );
}

#[tokio::test]
async fn documentation_is_served() {
    let server = start_server(|_| {}).await;
    let client = reqwest::Client::new();

    let doc: Value = client
        .get(server.url("/api-doc/openapi.json"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse document");
    assert!(doc["paths"]["/predict-success"]["post"].is_object());
    assert!(doc["paths"]["/idea-feedback"]["post"].is_object());

    let page = client
        .get(server.url("/docs"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(page.status(), StatusCode::OK);
    assert!(
        page.text()
            .await
            .expect("Failed to read page")
            .contains("swagger-ui")
    );
}
