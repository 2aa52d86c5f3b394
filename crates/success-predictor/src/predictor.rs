// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Success prediction orchestrator
//!
//! [`SuccessPredictor`] owns the loaded classifier and the feature encoder.
//! It is built once at startup and shared read-only between requests.

use std::{sync::Arc, time::Instant};

use shared_types::IdeaRequest;
use tracing::{debug, info, instrument};

use crate::{
    config::PredictorConfig,
    encoder::FeatureEncoder,
    error::{SuccessPredictorError, SuccessPredictorResult},
    model::{Classifier, RandomForest, SUCCESS_CLASS_INDEX},
    schema::FeatureSchema,
    types::{EncodedFeatureVector, PredictionResult},
};

/// Scores product ideas with the trained success classifier
#[derive(Debug, Clone)]
pub struct SuccessPredictor {
    encoder: FeatureEncoder,
    classifier: Arc<dyn Classifier>,
}

/// Description of the loaded model for health reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    /// Human-readable classifier description
    pub classifier: String,
    /// Feature schema in training order
    pub features: Vec<String>,
}

impl SuccessPredictor {
    /// Load the forest and schema named by `config`
    ///
    /// Fails when either artifact cannot be read or parsed, or when the
    /// schema length disagrees with the number of model features.
    #[instrument(skip(config), fields(model = %config.model_path.display()))]
    pub async fn from_config(config: &PredictorConfig) -> SuccessPredictorResult<Self> {
        info!("Initializing SuccessPredictor");

        let forest = RandomForest::from_file(&config.model_path).await?;
        let schema = FeatureSchema::from_file(&config.features_path).await?;

        Self::new(Arc::new(forest), schema, config.reject_unknown_category)
    }

    /// Build a predictor around an already loaded classifier
    pub fn new(
        classifier: Arc<dyn Classifier>,
        schema: FeatureSchema,
        reject_unknown_category: bool,
    ) -> SuccessPredictorResult<Self> {
        if classifier.n_features() != schema.len() {
            return Err(SuccessPredictorError::artifact(format!(
                "feature schema has {} columns but the model expects {}",
                schema.len(),
                classifier.n_features()
            )));
        }

        info!(
            classifier = %classifier.describe(),
            features = schema.len(),
            "SuccessPredictor ready"
        );

        Ok(Self {
            encoder: FeatureEncoder::new(schema, reject_unknown_category),
            classifier,
        })
    }

    /// Encode a request and return the probability of the success class
    #[instrument(skip(self, request), fields(product_category = %request.product_category))]
    pub fn predict(&self, request: &IdeaRequest) -> SuccessPredictorResult<PredictionResult> {
        let start_time = Instant::now();

        let input_data = self.encoder.encode(request)?;
        let success_probability = self.invoke(&input_data)?;

        debug!(
            success_probability,
            duration_us = start_time.elapsed().as_micros(),
            "Completed success prediction"
        );

        Ok(PredictionResult {
            success_probability,
            input_data,
        })
    }

    /// Run the classifier on one encoded row and extract class 1
    fn invoke(&self, vector: &EncodedFeatureVector) -> SuccessPredictorResult<f64> {
        let proba = self.classifier.predict_proba(&vector.to_row())?;

        let probability = proba.get(SUCCESS_CLASS_INDEX).copied().ok_or_else(|| {
            SuccessPredictorError::inference(format!(
                "classifier returned {} class probabilities, expected at least {}",
                proba.len(),
                SUCCESS_CLASS_INDEX + 1
            ))
        })?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(SuccessPredictorError::inference(format!(
                "classifier returned probability {probability} outside [0, 1]"
            )));
        }

        Ok(probability)
    }

    /// Summary of the loaded model
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            classifier: self.classifier.describe(),
            features: self.encoder.schema().columns().to_vec(),
        }
    }
}
