// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for success prediction
//!
//! Encoding failures and inference failures are kept apart so the server can
//! report them distinctly, while artifact errors only ever surface at startup.

use thiserror::Error;

/// Result type alias for success prediction operations
pub type SuccessPredictorResult<T> = Result<T, SuccessPredictorError>;

/// Error types for success prediction operations
#[derive(Debug, Error)]
pub enum SuccessPredictorError {
    /// The encoded columns do not match the feature schema of the model
    #[error("Feature schema mismatch: {}", describe_mismatch(.missing, .unexpected))]
    SchemaMismatch {
        /// Columns named by the schema that the encoder did not produce
        missing: Vec<String>,
        /// Columns produced by the encoder that the schema does not name
        unexpected: Vec<String>,
    },

    /// Product category outside the known set while strict matching is enabled
    #[error("Unknown product category '{category}'")]
    UnknownCategory {
        /// The rejected category label
        category: String,
    },

    /// The classifier could not produce a usable probability
    #[error("Inference error: {message}")]
    Inference {
        /// Error message
        message: String,
    },

    /// The model artifact or feature schema is malformed
    #[error("Model artifact error: {message}")]
    Artifact {
        /// Error message
        message: String,
    },

    /// I/O error while reading an artifact
    #[error("I/O error: {message}")]
    Io {
        /// Error message
        message: String,
    },

    /// JSON error while parsing an artifact
    #[error("JSON error: {message}")]
    Json {
        /// Error message
        message: String,
    },
}

fn describe_mismatch(missing: &[String], unexpected: &[String]) -> String {
    match (missing.is_empty(), unexpected.is_empty()) {
        (false, true) => format!("missing columns [{}]", missing.join(", ")),
        (true, false) => format!("unexpected columns [{}]", unexpected.join(", ")),
        _ => format!(
            "missing columns [{}], unexpected columns [{}]",
            missing.join(", "),
            unexpected.join(", ")
        ),
    }
}

impl SuccessPredictorError {
    /// Create a schema mismatch error
    pub fn schema_mismatch(missing: Vec<String>, unexpected: Vec<String>) -> Self {
        Self::SchemaMismatch {
            missing,
            unexpected,
        }
    }

    /// Create an unknown category error
    pub fn unknown_category<T: ToString>(category: T) -> Self {
        Self::UnknownCategory {
            category: category.to_string(),
        }
    }

    /// Create an inference error
    pub fn inference<T: ToString>(message: T) -> Self {
        Self::Inference {
            message: message.to_string(),
        }
    }

    /// Create an artifact error
    pub fn artifact<T: ToString>(message: T) -> Self {
        Self::Artifact {
            message: message.to_string(),
        }
    }

    /// Create an I/O error
    pub fn io<T: ToString>(message: T) -> Self {
        Self::Io {
            message: message.to_string(),
        }
    }

    /// Create a JSON error
    pub fn json<T: ToString>(message: T) -> Self {
        Self::Json {
            message: message.to_string(),
        }
    }

    /// Check if this error happened while encoding the request
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Check if this error is a rejection of the caller's input
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::UnknownCategory { .. })
    }

    /// Check if this error happened while invoking the classifier
    pub fn is_inference_error(&self) -> bool {
        matches!(self, Self::Inference { .. })
    }

    /// Check if this error comes from loading the model artifacts
    pub fn is_artifact_error(&self) -> bool {
        matches!(self, Self::Artifact { .. } | Self::Io { .. } | Self::Json { .. })
    }
}

impl From<std::io::Error> for SuccessPredictorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SuccessPredictorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_display() {
        let missing = SuccessPredictorError::schema_mismatch(vec!["marketSize".into()], vec![]);
        assert_eq!(
            missing.to_string(),
            "Feature schema mismatch: missing columns [marketSize]"
        );

        let unexpected =
            SuccessPredictorError::schema_mismatch(vec![], vec!["launchCost".into()]);
        assert_eq!(
            unexpected.to_string(),
            "Feature schema mismatch: unexpected columns [launchCost]"
        );

        let both = SuccessPredictorError::schema_mismatch(vec!["a".into()], vec!["b".into()]);
        assert_eq!(
            both.to_string(),
            "Feature schema mismatch: missing columns [a], unexpected columns [b]"
        );
    }

    #[test]
    fn error_classification() {
        let mismatch = SuccessPredictorError::schema_mismatch(vec!["x".into()], vec![]);
        assert!(mismatch.is_encoding_error());
        assert!(!mismatch.is_inference_error());

        let inference = SuccessPredictorError::inference("bad row");
        assert!(inference.is_inference_error());
        assert!(!inference.is_artifact_error());

        let category = SuccessPredictorError::unknown_category("Toys");
        assert!(category.is_validation_error());
        assert_eq!(category.to_string(), "Unknown product category 'Toys'");

        assert!(SuccessPredictorError::artifact("no trees").is_artifact_error());
        assert!(SuccessPredictorError::io("not found").is_artifact_error());
        assert!(SuccessPredictorError::json("eof").is_artifact_error());
    }
}
