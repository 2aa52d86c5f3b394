// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use shared_types::{FeedbackRequest, IdeaRequest};
use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers::{self, ErrorResponse, SuccessPredictionResponse},
    state::{HealthCheck, HealthStatus, ModelInfo},
};

/// `OpenAPI` document for the product success API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Product Success Predictor API",
        description = "Scores product ideas with a trained random forest and generates natural-language feedback on them."
    ),
    paths(
        handlers::health_handler,
        handlers::predict_success_handler,
        handlers::idea_feedback_handler,
    ),
    components(schemas(
        IdeaRequest,
        FeedbackRequest,
        SuccessPredictionResponse,
        ErrorResponse,
        HealthCheck,
        HealthStatus,
        ModelInfo,
        Environment,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "prediction", description = "Product success prediction"),
        (name = "feedback", description = "Idea feedback from a language model"),
    )
)]
pub struct ApiDoc;
