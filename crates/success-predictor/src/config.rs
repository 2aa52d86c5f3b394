// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Predictor configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the exported random forest
pub const DEFAULT_MODEL_PATH: &str = "models/random_forest_model.json";

/// Default location of the exported feature schema
pub const DEFAULT_FEATURES_PATH: &str = "models/model_features.json";

/// Where to find the model artifacts and how strictly to encode requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Path of the random forest JSON export
    pub model_path: PathBuf,
    /// Path of the feature schema JSON array
    pub features_path: PathBuf,
    /// Reject requests whose product category is outside the known set
    pub reject_unknown_category: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            features_path: PathBuf::from(DEFAULT_FEATURES_PATH),
            reject_unknown_category: false,
        }
    }
}

impl PredictorConfig {
    /// Configuration pointing at the given artifact files
    pub fn new(model_path: impl Into<PathBuf>, features_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            features_path: features_path.into(),
            ..Self::default()
        }
    }

    /// Enable or disable strict category matching
    pub fn with_reject_unknown_category(mut self, reject: bool) -> Self {
        self.reject_unknown_category = reject;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_models_directory() {
        let config = PredictorConfig::default();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.features_path, PathBuf::from(DEFAULT_FEATURES_PATH));
        assert!(!config.reject_unknown_category);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PredictorConfig =
            serde_json::from_str(r#"{ "reject_unknown_category": true }"#).unwrap();
        assert!(config.reject_unknown_category);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
