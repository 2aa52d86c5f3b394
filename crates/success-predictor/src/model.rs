// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Trained classifier artifact
//!
//! The success classifier is a random forest exported to JSON from the
//! fitted estimator's tree arrays. Each tree is a flat node list where
//! split nodes route a row left when `row[feature] <= threshold`, and leaf
//! nodes carry per-class sample weights. Class probabilities of a tree are
//! its leaf weights normalised to one; the forest averages them.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{SuccessPredictorError, SuccessPredictorResult};

/// Number of classes the success classifier distinguishes
pub const BINARY_CLASSES: usize = 2;

/// Index of the success class in the classifier output
pub const SUCCESS_CLASS_INDEX: usize = 1;

/// A classifier producing class probabilities for one numeric row
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Number of input columns the classifier was trained on
    fn n_features(&self) -> usize;

    /// Class probabilities for a single row, class 0 first
    fn predict_proba(&self, row: &[f64]) -> SuccessPredictorResult<Vec<f64>>;

    /// Short human-readable description for health reporting
    fn describe(&self) -> String;
}

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal node routing on one feature
    Split {
        /// Column index tested by this node
        feature: usize,
        /// Rows with `row[feature] <= threshold` go left
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node with per-class weights
    Leaf {
        /// Per-class sample weights (or counts)
        value: Vec<f64>,
    },
}

/// A single decision tree stored as a flat node list, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Nodes in pre-order; children always come after their parent
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {index} splits on feature {feature} but the model has {n_features} features"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {index} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(format!(
                                "node {index} points to invalid child {child}"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {index} has {} class values, expected {n_classes}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(format!("leaf {index} has a negative or non-finite value"));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("leaf {index} has no weight"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Leaf weights reached by `row`
    ///
    /// Children are validated to have a larger index than their parent, so
    /// the walk always terminates.
    fn leaf_for(&self, row: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// Random forest classifier averaging the class distributions of its trees
///
/// Every constructor validates the trees, including deserialization, so a
/// `RandomForest` value always has in-range splits and forward child links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForest")]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

/// Unchecked wire form of [`RandomForest`]
#[derive(Debug, Deserialize)]
struct RawForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl TryFrom<RawForest> for RandomForest {
    type Error = SuccessPredictorError;

    fn try_from(raw: RawForest) -> Result<Self, Self::Error> {
        Self::new(raw.n_features, raw.n_classes, raw.trees)
    }
}

impl RandomForest {
    /// Build a forest from fitted trees
    ///
    /// # Errors
    ///
    /// Returns `SuccessPredictorError::Artifact` if the forest is not a
    /// well-formed binary classifier over `n_features` columns.
    pub fn new(
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    ) -> SuccessPredictorResult<Self> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Load a forest from its JSON export and validate it
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SuccessPredictorResult<Self> {
        let path = path.as_ref();
        debug!("Loading random forest from: {}", path.display());

        let content = fs::read_to_string(path).await.map_err(|e| {
            SuccessPredictorError::io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let raw: RawForest = serde_json::from_str(&content).map_err(|e| {
            SuccessPredictorError::json(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let forest = Self::try_from(raw)?;

        info!(
            "Loaded random forest with {} trees over {} features from {}",
            forest.trees.len(),
            forest.n_features,
            path.display()
        );

        Ok(forest)
    }

    fn validate(&self) -> SuccessPredictorResult<()> {
        if self.n_classes != BINARY_CLASSES {
            return Err(SuccessPredictorError::artifact(format!(
                "expected a binary classifier, got {} classes",
                self.n_classes
            )));
        }
        if self.n_features == 0 {
            return Err(SuccessPredictorError::artifact(
                "model must have at least one feature",
            ));
        }
        if self.trees.is_empty() {
            return Err(SuccessPredictorError::artifact("forest has no trees"));
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|reason| {
                    SuccessPredictorError::artifact(format!("tree {index}: {reason}"))
                })?;
        }

        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> SuccessPredictorResult<Vec<f64>> {
        if row.len() != self.n_features {
            return Err(SuccessPredictorError::inference(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        if let Some(position) = row.iter().position(|v| !v.is_finite()) {
            return Err(SuccessPredictorError::inference(format!(
                "feature {position} is not a finite number"
            )));
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(row);
            let total: f64 = leaf.iter().sum();
            for (acc, weight) in proba.iter_mut().zip(leaf) {
                *acc += weight / total;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let n_trees = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n_trees;
        }

        Ok(proba)
    }

    fn describe(&self) -> String {
        format!(
            "random forest ({} trees, {} features)",
            self.trees.len(),
            self.n_features
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::{Value, json};
    use tempfile::NamedTempFile;

    use super::*;

    /// Two stumps on feature 0 and feature 1
    fn forest_json() -> Value {
        json!({
            "n_features": 2,
            "n_classes": 2,
            "trees": [
                {
                    "nodes": [
                        { "feature": 0, "threshold": 500.0, "left": 1, "right": 2 },
                        { "value": [1.0, 3.0] },
                        { "value": [8.0, 2.0] }
                    ]
                },
                {
                    "nodes": [
                        { "feature": 1, "threshold": 0.5, "left": 1, "right": 2 },
                        { "value": [6.0, 0.0] },
                        { "value": [0.0, 4.0] }
                    ]
                }
            ]
        })
    }

    fn forest() -> RandomForest {
        serde_json::from_value(forest_json()).unwrap()
    }

    fn trees() -> Vec<DecisionTree> {
        serde_json::from_value(forest_json()["trees"].clone()).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn averages_normalised_leaf_distributions() {
        let forest = forest();

        // left leaf of tree 0 (0.75) and right leaf of tree 1 (1.0)
        let proba = forest.predict_proba(&[100.0, 1.0]).unwrap();
        assert_close(proba[SUCCESS_CLASS_INDEX], 0.875);
        assert_close(proba[0], 0.125);

        // right leaf of tree 0 (0.2) and left leaf of tree 1 (0.0)
        let proba = forest.predict_proba(&[1000.0, 0.0]).unwrap();
        assert_close(proba[SUCCESS_CLASS_INDEX], 0.1);
    }

    #[test]
    fn threshold_is_inclusive_on_the_left() {
        // left leaf of tree 0 (0.75) and left leaf of tree 1 (0.0)
        let proba = forest().predict_proba(&[500.0, 0.0]).unwrap();
        assert_close(proba[SUCCESS_CLASS_INDEX], 0.375);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let forest = forest();
        for row in [[0.0, 0.0], [600.0, 1.0], [499.9, 0.7], [-5.0, 3.0]] {
            let proba = forest.predict_proba(&row).unwrap();
            assert_close(proba.iter().sum(), 1.0);
            assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn wrong_row_length_is_inference_error() {
        let err = forest().predict_proba(&[1.0]).unwrap_err();
        assert!(err.is_inference_error());
        assert!(err.to_string().contains("expected 2 features, got 1"));
    }

    #[test]
    fn non_finite_feature_is_inference_error() {
        let err = forest().predict_proba(&[f64::NAN, 1.0]).unwrap_err();
        assert!(err.is_inference_error());
    }

    #[test]
    fn rejects_non_binary_forest() {
        let err = RandomForest::new(2, 3, trees()).unwrap_err();
        assert!(err.is_artifact_error());
    }

    #[test]
    fn rejects_empty_forest() {
        assert!(RandomForest::new(2, 2, Vec::new()).is_err());
    }

    #[test]
    fn rejects_out_of_range_feature() {
        let mut trees = trees();
        trees[1].nodes[0] = TreeNode::Split {
            feature: 7,
            threshold: 0.5,
            left: 1,
            right: 2,
        };
        let err = RandomForest::new(2, 2, trees).unwrap_err();
        assert!(err.to_string().contains("tree 1"));
    }

    #[test]
    fn rejects_backward_child_pointer() {
        let mut trees = trees();
        trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 1.0,
            left: 0,
            right: 2,
        };
        assert!(RandomForest::new(2, 2, trees).is_err());
    }

    #[test]
    fn rejects_malformed_leaf() {
        let mut trees = trees();
        trees[0].nodes[1] = TreeNode::Leaf {
            value: vec![1.0, 1.0, 1.0],
        };
        assert!(RandomForest::new(2, 2, trees.clone()).is_err());

        trees[0].nodes[1] = TreeNode::Leaf {
            value: vec![0.0, 0.0],
        };
        assert!(RandomForest::new(2, 2, trees).is_err());
    }

    #[test]
    fn deserialization_rejects_dangling_child() {
        let mut value = forest_json();
        value["trees"][0]["nodes"][0]["right"] = json!(7);

        let err = serde_json::from_value::<RandomForest>(value).unwrap_err();
        assert!(err.to_string().contains("invalid child 7"));
    }

    #[test]
    fn deserialization_rejects_split_past_row() {
        let mut value = forest_json();
        value["trees"][1]["nodes"][0]["feature"] = json!(2);

        assert!(serde_json::from_value::<RandomForest>(value).is_err());
    }

    #[tokio::test]
    async fn loads_and_validates_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&forest()).unwrap()).unwrap();

        let loaded = RandomForest::from_file(file.path()).await.unwrap();
        assert_eq!(loaded, forest());
        assert_eq!(loaded.describe(), "random forest (2 trees, 2 features)");
    }

    #[tokio::test]
    async fn invalid_forest_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({ "n_features": 2, "n_classes": 2, "trees": [] })
        )
        .unwrap();

        let err = RandomForest::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, SuccessPredictorError::Artifact { .. }));
    }
}
