// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the product success API
//! server: health, success prediction and idea feedback.

use axum::{Json, extract::State};
use serde::Serialize;
use shared_types::{FeedbackRequest, IdeaRequest};
use success_predictor::EncodedFeatureVector;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the API service including version, environment information and a summary of the loaded success model.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check())
}

/// Response from the success prediction endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuccessPredictionResponse {
    /// Probability that the idea succeeds, in `[0, 1]`
    #[schema(example = 0.82)]
    pub success_prediction: f64,
    /// The encoded feature row the classifier was invoked with
    #[schema(value_type = Object, example = json!({
        "launchCost": 1000.0,
        "expectedROI": 2.5,
        "creatorExperienceLevel": 3.0,
        "trendAlignment": true,
        "customerValidation": true,
        "productCategory_Finance": 0,
        "productCategory_Healthcare": 0,
        "productCategory_Retail": 0,
        "productCategory_Tech": 1
    }))]
    pub input_data: EncodedFeatureVector,
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "this origin is not allowed to access this API")]
    pub error: String,
}

/// Product success prediction
///
/// One-hot encodes the product category, projects the fields onto the
/// model's feature schema and returns the probability of the success class.
///
/// # Errors
///
/// Returns `ServerError` if the request cannot be encoded for the model or
/// the classifier fails.
#[utoipa::path(
    post,
    path = "/predict-success",
    tag = "prediction",
    summary = "Predict product success",
    description = "Scores a product idea with the trained random forest and echoes the encoded feature row.",
    request_body = IdeaRequest,
    responses(
        (status = 200, description = "Prediction completed", body = SuccessPredictionResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Request body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Encoding or inference failed", body = ErrorResponse)
    )
)]
pub async fn predict_success_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<IdeaRequest>,
) -> Result<Json<SuccessPredictionResponse>, ServerError> {
    let result = state.predictor().predict(&request)?;

    info!(
        product_category = %request.product_category,
        success_prediction = result.success_probability,
        "scored product idea"
    );

    Ok(Json(SuccessPredictionResponse {
        success_prediction: result.success_probability,
        input_data: result.input_data,
    }))
}

/// Idea feedback
///
/// Asks the completion provider for a short assessment of the idea and
/// returns its text unchanged as `text/plain`.
///
/// # Errors
///
/// Returns `ServerError` if the completion provider call fails.
#[utoipa::path(
    post,
    path = "/idea-feedback",
    tag = "feedback",
    summary = "Get feedback on a product idea",
    description = "Generates a 4-5 sentence natural-language assessment of the idea. Requests carrying an Origin header outside the configured allow-list are rejected.",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Generated feedback", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 403, description = "Origin not allowed", body = ErrorResponse),
        (status = 422, description = "Request body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Completion provider failed", body = ErrorResponse)
    )
)]
pub async fn idea_feedback_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<FeedbackRequest>,
) -> Result<String, ServerError> {
    let feedback = state.advisor().feedback(&request).await?;
    Ok(feedback)
}
