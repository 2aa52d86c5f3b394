// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Middleware module for HTTP request processing
//!
//! Provides the origin allow-list check guarding the idea feedback route
//! and the JSON body for router-level timeouts. The origin check is a best-effort filter on a client-supplied header, not
//! authentication: any non-browser client can set `Origin` to an allowed
//! value.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::ServerError;

/// Exact-match allow-list for the `Origin` request header
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Arc<[String]>,
}

impl OriginPolicy {
    /// Create a policy accepting exactly the given origins
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Origins this policy accepts
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Whether `origin` is a member of the allow-list
    ///
    /// Case-sensitive with no normalisation, so `http://localhost:8080/`
    /// does not match `http://localhost:8080`.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
    }

    /// Check the `Origin` header of a request
    ///
    /// A request without the header passes. A header that is not valid
    /// visible ASCII cannot match any entry and is rejected.
    pub fn check(&self, origin: Option<&HeaderValue>) -> Result<(), ServerError> {
        let Some(origin) = origin else {
            debug!("no Origin header, skipping allow-list check");
            return Ok(());
        };

        match origin.to_str() {
            Ok(origin) if self.is_allowed(origin) => Ok(()),
            Ok(origin) => {
                warn!(origin, "rejecting request from origin outside the allow-list");
                Err(ServerError::OriginNotAllowed)
            }
            Err(_) => {
                warn!(origin = ?origin, "rejecting request with unreadable Origin header");
                Err(ServerError::OriginNotAllowed)
            }
        }
    }
}

/// Origin allow-list middleware function
///
/// Rejects with `403 {"error": "this origin is not allowed to access this API"}`
/// before the request body is read.
pub async fn origin_guard(
    State(policy): State<OriginPolicy>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ServerError> {
    policy.check(req.headers().get(ORIGIN))?;
    Ok(next.run(req).await)
}

/// Replace the bare `408` of the request timeout layer with an error body
pub async fn timeout_response(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ServerError::RequestTimeout.into_response();
    }
    response
}
