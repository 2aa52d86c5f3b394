// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides the error types for server operations and their
//! mapping to HTTP responses. Every error response body is
//! `{"error": <message>}`.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use idea_advisor::IdeaAdvisorError;
use success_predictor::SuccessPredictorError;
use thiserror::Error;
use tracing::{error, warn};

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Model artifacts or the completion client could not be initialised
    #[error("Initialization failed: {message}")]
    Initialization {
        /// Error message
        message: String,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// The request `Origin` is not on the allow-list
    #[error("this origin is not allowed to access this API")]
    OriginNotAllowed,

    /// The request could not be mapped onto the model's feature schema
    #[error("{0}")]
    Encoding(String),

    /// The classifier failed on an encoded row
    #[error("{0}")]
    Inference(String),

    /// The completion provider call failed
    #[error("{0}")]
    Completion(String),

    /// Input validation errors
    #[error("{0}")]
    Validation(String),

    /// The request exceeded the router timeout
    #[error("request timed out")]
    RequestTimeout,

    /// Well-formed JSON that does not match the request type
    #[error("{0}")]
    UnprocessableEntity(String),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::OriginNotAllowed => StatusCode::FORBIDDEN,
            Self::Validation(..) => StatusCode::BAD_REQUEST,
            Self::UnprocessableEntity(..) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Encoding(..)
            | Self::Inference(..)
            | Self::Completion(..)
            | Self::Config { .. }
            | Self::Bind { .. }
            | Self::Startup { .. }
            | Self::Initialization { .. }
            | Self::Shutdown { .. }
            | Self::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<SuccessPredictorError> for ServerError {
    fn from(err: SuccessPredictorError) -> Self {
        if err.is_validation_error() {
            Self::Validation(err.to_string())
        } else if err.is_encoding_error() {
            Self::Encoding(err.to_string())
        } else if err.is_artifact_error() {
            Self::Initialization {
                message: err.to_string(),
            }
        } else {
            Self::Inference(err.to_string())
        }
    }
}

impl From<IdeaAdvisorError> for ServerError {
    fn from(err: IdeaAdvisorError) -> Self {
        Self::Completion(err.to_string())
    }
}

/// Convenient From implementations for common async error types
impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(error: ServerError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn origin_rejection_body() {
        let (status, body) = body_json(ServerError::OriginNotAllowed).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            serde_json::json!({ "error": "this origin is not allowed to access this API" })
        );
    }

    #[tokio::test]
    async fn schema_mismatch_is_internal_error() {
        let err = SuccessPredictorError::schema_mismatch(vec!["productCategory_Games".into()], vec![]);
        let (status, body) = body_json(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("productCategory_Games")
        );
    }

    #[test]
    fn predictor_error_mapping() {
        assert!(matches!(
            ServerError::from(SuccessPredictorError::unknown_category("Gaming")),
            ServerError::Validation(..)
        ));
        assert!(matches!(
            ServerError::from(SuccessPredictorError::inference("row has 3 values")),
            ServerError::Inference(..)
        ));
        assert!(matches!(
            ServerError::from(SuccessPredictorError::artifact("no trees")),
            ServerError::Initialization { .. }
        ));
    }

    #[test]
    fn completion_errors_are_internal() {
        let err = ServerError::from(IdeaAdvisorError::from_status(401, "Incorrect API key".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[test]
    fn client_error_statuses() {
        assert_eq!(
            ServerError::Validation("empty body".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::UnprocessableEntity("missing field".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServerError::RequestTimeout.status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
    }
}
