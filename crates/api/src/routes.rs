// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the product
//! success API server.

pub mod handlers;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use handlers::{health_handler, idea_feedback_handler, predict_success_handler};

use crate::{
    middleware::{OriginPolicy, origin_guard},
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
///
/// Only `/idea-feedback` sits behind the origin allow-list.
pub fn create_routes(origin_policy: OriginPolicy) -> Router<ServerState> {
    let health_routes = Router::new().route("/health", get(health_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/docs", get(swagger_ui));

    let prediction_routes = Router::new().route("/predict-success", post(predict_success_handler));

    let feedback_routes = Router::new()
        .route("/idea-feedback", post(idea_feedback_handler))
        .layer(from_fn_with_state(origin_policy, origin_guard));

    Router::new()
        .merge(health_routes)
        .merge(docs_routes)
        .merge(prediction_routes)
        .merge(feedback_routes)
}
