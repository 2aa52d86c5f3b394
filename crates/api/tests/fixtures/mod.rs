// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures for HTTP integration tests
//!
//! Writes a small exported forest and feature schema to a temporary
//! directory and starts the real router on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;

use api::{Server, ServerConfig, ShutdownConfig};
use serde_json::json;
use success_predictor::PredictorConfig;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Feature schema in the order the forest was fitted on
pub const TRAINING_COLUMNS: [&str; 9] = [
    "launchCost",
    "expectedROI",
    "creatorExperienceLevel",
    "trendAlignment",
    "customerValidation",
    "productCategory_Finance",
    "productCategory_Healthcare",
    "productCategory_Retail",
    "productCategory_Tech",
];

/// Three shallow trees over launch cost, validation and the Tech indicator
pub fn forest_json() -> serde_json::Value {
    json!({
        "n_features": 9,
        "n_classes": 2,
        "trees": [
            { "nodes": [
                { "feature": 0, "threshold": 5000.0, "left": 1, "right": 4 },
                { "feature": 4, "threshold": 0.5, "left": 2, "right": 3 },
                { "value": [12.0, 8.0] },
                { "value": [4.0, 16.0] },
                { "value": [15.0, 5.0] }
            ]},
            { "nodes": [
                { "feature": 8, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [10.0, 10.0] },
                { "value": [3.0, 17.0] }
            ]},
            { "nodes": [
                { "feature": 1, "threshold": 1.75, "left": 1, "right": 2 },
                { "value": [14.0, 6.0] },
                { "value": [6.0, 14.0] }
            ]}
        ]
    })
}

/// Write the forest and a schema with `columns` into `dir`
pub fn write_artifacts(dir: &TempDir, columns: &[&str]) -> PredictorConfig {
    let model_path = dir.path().join("random_forest_model.json");
    let features_path = dir.path().join("model_features.json");

    std::fs::write(&model_path, forest_json().to_string()).expect("Failed to write model");
    std::fs::write(&features_path, json!(columns).to_string()).expect("Failed to write schema");

    PredictorConfig::new(model_path, features_path)
}

/// Server running on an ephemeral port, stopped on drop
#[derive(Debug)]
pub struct TestServer {
    /// Bound address
    pub addr: SocketAddr,
    token: CancellationToken,
    _artifacts: TempDir,
}

impl TestServer {
    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Start a server with the training schema and a testing configuration
pub async fn start_server(configure: impl FnOnce(&mut ServerConfig)) -> TestServer {
    start_server_with_columns(&TRAINING_COLUMNS, configure).await
}

/// Start a server whose feature schema is `columns`
pub async fn start_server_with_columns(
    columns: &[&str],
    configure: impl FnOnce(&mut ServerConfig),
) -> TestServer {
    let artifacts = TempDir::new().expect("Failed to create artifact dir");

    let mut config = ServerConfig::for_testing();
    config.model = write_artifacts(&artifacts, columns);
    configure(&mut config);

    let (addr, token) = Server::new(config, ShutdownConfig::default())
        .await
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");

    TestServer {
        addr,
        token,
        _artifacts: artifacts,
    }
}
