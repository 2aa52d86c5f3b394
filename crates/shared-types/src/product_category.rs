// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Product category types
//!
//! The classifier was trained on a one-hot expansion of a closed set of
//! product categories. This module owns that set and the naming scheme of
//! the indicator columns derived from it.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Prefix of every one-hot indicator column derived from a product category
pub const ONE_HOT_PREFIX: &str = "productCategory_";

/// Product categories known to the trained classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    /// Financial products and services
    Finance,
    /// Healthcare products and services
    Healthcare,
    /// Retail products
    Retail,
    /// Technology products
    Tech,
}

impl ProductCategory {
    /// Returns the label used for this category on the wire and in column names
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Healthcare => "Healthcare",
            Self::Retail => "Retail",
            Self::Tech => "Tech",
        }
    }

    /// Returns all categories in training order
    pub const fn all() -> &'static [Self] {
        &[Self::Finance, Self::Healthcare, Self::Retail, Self::Tech]
    }

    /// Returns the name of the one-hot indicator column for this category
    pub fn column_name(self) -> String {
        format!("{ONE_HOT_PREFIX}{}", self.label())
    }

    /// Matches a raw label against the closed set
    ///
    /// Matching is exact and case-sensitive, which is how the training data
    /// was encoded.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not part of the closed category set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product category '{0}', expected one of: Finance, Healthcare, Retail, Tech")]
pub struct ProductCategoryParseError(pub String);

impl FromStr for ProductCategory {
    type Err = ProductCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ProductCategoryParseError(s.to_string()))
    }
}
