// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Product Success API Server Implementation
//!
//! This crate provides the HTTP server for the product success service, built
//! with Axum. It scores product ideas with a trained random forest and relays
//! idea feedback requests to a language model.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`middleware`]: Origin allow-list check for the feedback route
//! - [`extractors`]: JSON body extraction with `400`/`422` error mapping
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Endpoints
//!
//! - `POST /predict-success`: success probability plus the encoded feature row
//! - `POST /idea-feedback`: plain-text feedback, origin-checked
//! - `GET /health`, `GET /api-doc/openapi.json`, `GET /docs`

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, FeedbackConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
