// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Feature schema of the trained classifier
//!
//! The schema is the ordered list of column names the model was fitted on.
//! It is exported next to the model as a JSON array of strings.

use std::{collections::HashSet, path::Path, sync::Arc};

use tokio::fs;
use tracing::{debug, info};

use crate::error::{SuccessPredictorError, SuccessPredictorResult};

/// Ordered, duplicate-free list of feature names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Arc<[String]>,
}

impl FeatureSchema {
    /// Create a schema, rejecting empty lists and duplicate names
    pub fn new<I, S>(columns: I) -> SuccessPredictorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(SuccessPredictorError::artifact(
                "feature schema cannot be empty",
            ));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.is_empty() {
                return Err(SuccessPredictorError::artifact(
                    "feature schema contains an empty column name",
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(SuccessPredictorError::artifact(format!(
                    "feature schema lists column '{column}' more than once"
                )));
            }
        }

        Ok(Self {
            columns: columns.into(),
        })
    }

    /// Load a schema from a JSON array file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SuccessPredictorResult<Self> {
        let path = path.as_ref();
        debug!("Loading feature schema from: {}", path.display());

        let content = fs::read_to_string(path).await.map_err(|e| {
            SuccessPredictorError::io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let columns: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            SuccessPredictorError::json(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let schema = Self::new(columns)?;
        info!(
            "Loaded feature schema with {} columns from {}",
            schema.len(),
            path.display()
        );
        Ok(schema)
    }

    /// Column names in training order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn rejects_empty_and_duplicate_columns() {
        let empty: Vec<String> = Vec::new();
        assert!(FeatureSchema::new(empty).is_err());
        assert!(FeatureSchema::new(["launchCost", "launchCost"]).is_err());
        assert!(FeatureSchema::new(["launchCost", ""]).is_err());
        assert!(FeatureSchema::new(["launchCost", "expectedROI"]).is_ok());
    }

    #[tokio::test]
    async fn loads_from_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["launchCost", "expectedROI", "productCategory_Tech"]"#).unwrap();

        let schema = FeatureSchema::from_file(file.path()).await.unwrap();
        assert_eq!(
            schema.columns(),
            ["launchCost", "expectedROI", "productCategory_Tech"]
        );
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FeatureSchema::from_file("/nonexistent/model_features.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SuccessPredictorError::Io { .. }));
    }

    #[tokio::test]
    async fn non_array_is_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"columns": []}}"#).unwrap();

        let err = FeatureSchema::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, SuccessPredictorError::Json { .. }));
    }
}
