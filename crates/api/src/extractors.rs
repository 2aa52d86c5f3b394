// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for improved error handling
//!
//! This module provides custom extractors that offer better error messages
//! than the default Axum extractors, particularly for JSON parsing failures,
//! and that answer with the service's `{"error"}` body shape.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ServerError;

mod error_hints {
    pub const MISSING_COMMA: &str =
        "check for missing or extra commas between object properties or array elements";
    pub const MISSING_BRACE: &str = "check for missing closing brace '}' for JSON object";
    pub const MISSING_BRACKET: &str = "check for missing closing bracket ']' for JSON array";
    pub const MISSING_QUOTES: &str =
        "check for missing or improperly escaped quotes around string values";
    pub const CONTROL_CHARS: &str = "JSON contains invalid control characters that must be escaped";
    pub const EXPECTED_VALUE: &str =
        "expected a valid JSON value (string, number, boolean, null, object, or array)";
    pub const DEFAULT_SYNTAX: &str = "check JSON formatting and structure";
    pub const EMPTY_BODY: &str = "request body is empty, expected valid JSON";
    pub const TRUNCATED_JSON: &str =
        "unexpected end of JSON input, request appears to be truncated";
}

const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024; // 1MB limit

/// JSON extractor with detailed error messages for parsing failures
///
/// Malformed input (wrong content type, empty body, syntax errors) is a
/// `400`. Well-formed JSON that does not fit `T` (missing fields, wrong
/// types) is a `422`.
#[derive(Debug)]
pub struct JsonExtractor<T>(pub T);

impl<T, S> FromRequest<S> for JsonExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Self::extract_json(req, state).await
    }
}

impl<T> JsonExtractor<T>
where
    T: DeserializeOwned,
{
    async fn extract_json<S>(req: Request, state: &S) -> Result<Self, ServerError>
    where
        S: Send + Sync,
    {
        // Validate content-type if present
        if let Some(content_type) = req.headers().get(CONTENT_TYPE)
            && let Ok(content_type_str) = content_type.to_str()
            && !content_type_str.starts_with("application/json")
        {
            return Err(ServerError::Validation(format!(
                "invalid content-type: expected 'application/json', got '{content_type_str}'"
            )));
        }

        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(rejection) => {
                return Err(ServerError::Validation(format!(
                    "failed to read request body: {rejection}"
                )));
            }
        };

        // Check payload size limit
        if bytes.len() > MAX_JSON_PAYLOAD_SIZE {
            return Err(ServerError::Validation(format!(
                "request body too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_JSON_PAYLOAD_SIZE
            )));
        }

        // Check for empty body
        if bytes.is_empty() {
            return Err(ServerError::Validation(error_hints::EMPTY_BODY.to_string()));
        }

        serde_json::from_slice::<T>(&bytes)
            .map(JsonExtractor)
            .map_err(|err| Self::rejection(&err))
    }

    fn rejection(err: &serde_json::Error) -> ServerError {
        match err.classify() {
            Category::Data => ServerError::UnprocessableEntity(format!(
                "JSON data validation failed: {}",
                get_data_validation_hint(err)
            )),
            Category::Syntax => ServerError::Validation(format!(
                "invalid JSON syntax at line {}, column {}: {}",
                err.line(),
                err.column(),
                get_json_syntax_hint(err)
            )),
            Category::Eof => ServerError::Validation(error_hints::TRUNCATED_JSON.to_string()),
            Category::Io => ServerError::Validation(format!("JSON parsing error: {err}")),
        }
    }
}

impl<T> IntoResponse for JsonExtractor<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

/// Provides helpful hints for JSON syntax errors
fn get_json_syntax_hint(err: &serde_json::Error) -> &'static str {
    let err_msg = err.to_string();

    if err_msg.contains("expected `,`") || err_msg.contains("trailing comma") {
        error_hints::MISSING_COMMA
    } else if err_msg.contains("expected `}`") {
        error_hints::MISSING_BRACE
    } else if err_msg.contains("expected `]`") {
        error_hints::MISSING_BRACKET
    } else if err_msg.contains("expected `\"`") || err_msg.contains("key must be a string") {
        error_hints::MISSING_QUOTES
    } else if err_msg.contains("control character") {
        error_hints::CONTROL_CHARS
    } else if err_msg.contains("expected value") {
        error_hints::EXPECTED_VALUE
    } else {
        error_hints::DEFAULT_SYNTAX
    }
}

/// Provides helpful hints for data validation errors
fn get_data_validation_hint(err: &serde_json::Error) -> String {
    let err_msg = err.to_string();

    if err_msg.contains("invalid type") {
        if err_msg.contains("expected a string") {
            format!("expected a string value, but received a different data type: {err_msg}")
        } else if err_msg.contains("expected f64") || err_msg.contains("expected a number") {
            format!("expected a numeric value, but received a different data type: {err_msg}")
        } else if err_msg.contains("expected a boolean") {
            format!(
                "expected a boolean value (true or false), but received a different data type: {err_msg}"
            )
        } else if err_msg.contains("expected struct") {
            "expected a JSON object, but received a different data type".to_string()
        } else {
            format!("data type mismatch: {err_msg}")
        }
    } else if err_msg.contains("missing field") {
        format!("required field is missing: {err_msg}")
    } else if err_msg.contains("unknown field") {
        format!("unrecognized field found: {err_msg}")
    } else {
        err_msg
    }
}
