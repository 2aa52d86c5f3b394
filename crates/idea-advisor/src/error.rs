// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for idea feedback operations
//!
//! Every failure of the completion round-trip is a completion error from the
//! caller's point of view. The variants keep enough detail to log and
//! report what went wrong with the provider.

use thiserror::Error;

/// Result type alias for idea feedback operations
pub type IdeaAdvisorResult<T> = Result<T, IdeaAdvisorError>;

/// Error types for idea feedback operations
#[derive(Debug, Error)]
pub enum IdeaAdvisorError {
    /// Client configuration is invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The provider rejected the request with an error body
    #[error("OpenAI API error: {message}")]
    OpenAi { message: String },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The provider is rate limiting this key
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Request timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Provider-side failure
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The response could not be interpreted
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },
}

impl IdeaAdvisorError {
    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create an HTTP error
    pub fn http<T: ToString>(message: T) -> Self {
        Self::Http {
            message: message.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Create an invalid response error
    pub fn invalid_response<T: ToString>(message: T) -> Self {
        Self::InvalidResponse {
            message: message.to_string(),
        }
    }

    /// Map a non-success provider status to the matching variant
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Authentication { message },
            429 => Self::RateLimited { message },
            500..=599 => Self::ServiceUnavailable { message },
            _ => Self::OpenAi { message },
        }
    }

    /// Check if this error indicates an authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Check if this error indicates a configuration problem
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<reqwest::Error> for IdeaAdvisorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Http {
                message: format!("request timed out: {err}"),
            }
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), err.to_string())
        } else {
            Self::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for IdeaAdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(IdeaAdvisorError::from_status(401, "bad key".into()).is_auth_error());
        assert!(IdeaAdvisorError::from_status(403, "forbidden".into()).is_auth_error());
        assert!(matches!(
            IdeaAdvisorError::from_status(429, "slow down".into()),
            IdeaAdvisorError::RateLimited { .. }
        ));
        assert!(matches!(
            IdeaAdvisorError::from_status(503, "down".into()),
            IdeaAdvisorError::ServiceUnavailable { .. }
        ));
        assert!(matches!(
            IdeaAdvisorError::from_status(400, "bad request".into()),
            IdeaAdvisorError::OpenAi { .. }
        ));
    }

    #[test]
    fn error_display() {
        let error = IdeaAdvisorError::from_status(404, "model not found".into());
        assert_eq!(error.to_string(), "OpenAI API error: model not found");

        let error = IdeaAdvisorError::timeout(60);
        assert_eq!(error.to_string(), "Request timeout after 60 seconds");
    }

    #[test]
    fn config_classification() {
        assert!(IdeaAdvisorError::config("empty key").is_config_error());
        assert!(!IdeaAdvisorError::http("reset").is_config_error());
    }
}
