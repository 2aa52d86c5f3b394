// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Product success prediction
//!
//! This crate scores product ideas with a pre-trained random forest. It owns
//! the one step that has to be exactly right for the model to be meaningful:
//! turning an [`IdeaRequest`](shared_types::IdeaRequest) into the same
//! feature row layout the classifier was fitted on.
//!
//! # Architecture
//!
//! - [`encoder`]: one-hot expansion of the product category and projection
//!   onto the feature schema
//! - [`schema`]: the ordered feature list exported with the model
//! - [`model`]: the [`Classifier`] seam and the JSON random forest artifact
//! - [`predictor`]: loads the artifacts once and scores requests
//! - [`error`]: typed errors separating encoding from inference failures
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use shared_types::IdeaRequest;
//! use success_predictor::{PredictorConfig, SuccessPredictor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let predictor = SuccessPredictor::from_config(&PredictorConfig::default()).await?;
//!
//! let result = predictor.predict(&IdeaRequest {
//!     launch_cost: 1000.0,
//!     expected_roi: 2.5,
//!     creator_experience_level: 3.0,
//!     product_category: "Tech".to_string(),
//!     trend_alignment: true,
//!     customer_validation: true,
//! })?;
//!
//! println!("success probability: {:.2}", result.success_probability);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod model;
pub mod predictor;
pub mod schema;
pub mod types;

pub use config::PredictorConfig;
pub use encoder::FeatureEncoder;
pub use error::{SuccessPredictorError, SuccessPredictorResult};
pub use model::{Classifier, DecisionTree, RandomForest, TreeNode};
pub use predictor::{ModelSummary, SuccessPredictor};
pub use schema::FeatureSchema;
pub use types::{EncodedFeatureVector, FeatureValue, PredictionResult};
