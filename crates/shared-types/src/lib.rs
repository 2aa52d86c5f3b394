// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the product success API
//!
//! This crate provides the wire request types and the closed product category
//! set that are shared across the predictor, advisor and server crates,
//! avoiding circular dependencies.

pub mod idea;
pub mod product_category;

pub use idea::{FeedbackRequest, IdeaRequest};
pub use product_category::{ONE_HOT_PREFIX, ProductCategory, ProductCategoryParseError};
