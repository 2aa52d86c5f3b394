// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Feature encoding
//!
//! Turns an [`IdeaRequest`] into the row the classifier was trained on:
//! scalar fields are taken as-is, the product category is expanded into one
//! indicator column per known category, and the merged columns are projected
//! onto the model's feature schema. The projection must be exact; a schema
//! that names a column the encoder does not produce, or the reverse, is an
//! error rather than a silently reshaped row.

use std::collections::HashMap;

use shared_types::{IdeaRequest, ProductCategory};
use tracing::warn;

use crate::{
    error::{SuccessPredictorError, SuccessPredictorResult},
    schema::FeatureSchema,
    types::{EncodedFeatureVector, FeatureValue},
};

/// Column names of the scalar request fields
pub mod columns {
    /// Launch cost column
    pub const LAUNCH_COST: &str = "launchCost";
    /// Expected ROI column
    pub const EXPECTED_ROI: &str = "expectedROI";
    /// Creator experience column
    pub const CREATOR_EXPERIENCE_LEVEL: &str = "creatorExperienceLevel";
    /// Trend alignment column
    pub const TREND_ALIGNMENT: &str = "trendAlignment";
    /// Customer validation column
    pub const CUSTOMER_VALIDATION: &str = "customerValidation";
}

/// Encodes idea requests against a fixed feature schema
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    reject_unknown_category: bool,
}

impl FeatureEncoder {
    /// Create an encoder for the given schema
    ///
    /// With `reject_unknown_category` unset, a category outside the known set
    /// encodes as all-zero indicators, which is what the model saw during
    /// training for such rows.
    pub fn new(schema: FeatureSchema, reject_unknown_category: bool) -> Self {
        Self {
            schema,
            reject_unknown_category,
        }
    }

    /// The schema rows are projected onto
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encode a request into a schema-ordered feature vector
    pub fn encode(&self, request: &IdeaRequest) -> SuccessPredictorResult<EncodedFeatureVector> {
        if request.category().is_none() {
            if self.reject_unknown_category {
                return Err(SuccessPredictorError::unknown_category(
                    &request.product_category,
                ));
            }
            warn!(
                product_category = %request.product_category,
                "product category not in the known set, encoding as all-zero indicators"
            );
        }

        let mut merged: HashMap<String, FeatureValue> = scalar_fields(request)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        merged.extend(one_hot_category(&request.product_category));

        project(merged, &self.schema)
    }
}

/// Scalar request fields, `productCategory` excluded
fn scalar_fields(request: &IdeaRequest) -> [(&'static str, FeatureValue); 5] {
    [
        (
            columns::LAUNCH_COST,
            FeatureValue::Continuous(request.launch_cost),
        ),
        (
            columns::EXPECTED_ROI,
            FeatureValue::Continuous(request.expected_roi),
        ),
        (
            columns::CREATOR_EXPERIENCE_LEVEL,
            FeatureValue::Continuous(request.creator_experience_level),
        ),
        (
            columns::TREND_ALIGNMENT,
            FeatureValue::Flag(request.trend_alignment),
        ),
        (
            columns::CUSTOMER_VALIDATION,
            FeatureValue::Flag(request.customer_validation),
        ),
    ]
}

/// One indicator column per known category, hot where the label matches exactly
pub fn one_hot_category(label: &str) -> Vec<(String, FeatureValue)> {
    ProductCategory::all()
        .iter()
        .map(|category| {
            (
                category.column_name(),
                FeatureValue::indicator(category.label() == label),
            )
        })
        .collect()
}

/// Select and order `merged` columns strictly by `schema`
pub fn project(
    mut merged: HashMap<String, FeatureValue>,
    schema: &FeatureSchema,
) -> SuccessPredictorResult<EncodedFeatureVector> {
    let mut columns = Vec::with_capacity(schema.len());
    let mut missing = Vec::new();

    for name in schema.columns() {
        match merged.remove(name) {
            Some(value) => columns.push((name.clone(), value)),
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() || !merged.is_empty() {
        let mut unexpected: Vec<String> = merged.into_keys().collect();
        unexpected.sort();
        return Err(SuccessPredictorError::schema_mismatch(missing, unexpected));
    }

    Ok(EncodedFeatureVector::from_columns(columns))
}
