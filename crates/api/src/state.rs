// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the product success API
//! server: configuration, the loaded predictor, the feedback client and the
//! cancellation token for coordinated shutdown. Everything in it is read-only
//! after startup.

use std::sync::Arc;

use idea_advisor::IdeaAdvisor;
use serde::{Deserialize, Serialize};
use success_predictor::SuccessPredictor;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::{
    config::{Environment, ServerConfig},
    middleware::OriginPolicy,
};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Loaded success classifier and its feature encoder
    predictor: Arc<SuccessPredictor>,
    /// Completion client for idea feedback
    advisor: Arc<IdeaAdvisor>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `predictor` - Success predictor built from the model artifacts
    /// * `advisor` - Idea feedback client
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        predictor: Arc<SuccessPredictor>,
        advisor: Arc<IdeaAdvisor>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            predictor,
            advisor,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Success predictor
    pub fn predictor(&self) -> &SuccessPredictor {
        &self.predictor
    }

    /// Idea feedback client
    pub fn advisor(&self) -> &IdeaAdvisor {
        &self.advisor
    }

    /// Origin allow-list for the feedback route
    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::new(self.config.feedback.allowed_origins.iter().cloned())
    }

    /// Report service status and the loaded model
    pub fn health_check(&self) -> HealthCheck {
        let summary = self.predictor.summary();

        HealthCheck {
            status: HealthStatus::Up,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: ModelInfo {
                classifier: summary.classifier,
                features: summary.features,
            },
            feedback_model: self.advisor.model().to_string(),
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,
}

/// Loaded classifier as reported by the health endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ModelInfo {
    /// Classifier description
    #[schema(example = "random forest (100 trees, 9 features)")]
    pub classifier: String,
    /// Feature schema in training order
    pub features: Vec<String>,
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    #[schema(value_type = String)]
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Loaded success classifier
    pub model: ModelInfo,
    /// Chat model used for idea feedback
    pub feedback_model: String,
}
