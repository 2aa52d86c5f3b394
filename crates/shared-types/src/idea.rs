// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Idea request types
//!
//! Request bodies accepted by the prediction and feedback endpoints. Field
//! names follow the camelCase convention of the client application.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::product_category::ProductCategory;

/// Description of a product idea to score with the success classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRequest {
    /// Estimated cost of launching the product
    #[schema(example = 1000.0)]
    pub launch_cost: f64,
    /// Expected return on investment
    #[serde(rename = "expectedROI")]
    #[schema(example = 2.5)]
    pub expected_roi: f64,
    /// Experience level of the creator
    #[schema(example = 3.0)]
    pub creator_experience_level: f64,
    /// Product category label (Finance, Healthcare, Retail or Tech)
    #[schema(example = "Tech")]
    pub product_category: String,
    /// Whether the idea is aligned with a current trend
    pub trend_alignment: bool,
    /// Whether the idea has been validated with customers
    pub customer_validation: bool,
}

impl IdeaRequest {
    /// Returns the known category matching `product_category`, if any
    pub fn category(&self) -> Option<ProductCategory> {
        ProductCategory::from_label(&self.product_category)
    }
}

/// Idea to be assessed in natural language by the completion provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Short name of the idea
    #[schema(example = "MealMate")]
    pub idea_name: String,
    /// Free-text description of the idea
    #[schema(example = "An app that plans weekly meals around what is already in your fridge.")]
    pub idea_description: String,
}
