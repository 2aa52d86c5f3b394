// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Encoded feature and prediction types

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A single encoded feature value
///
/// The kind is kept so the encoded row can be echoed back to the caller the
/// way it was built. The classifier only ever sees [`FeatureValue::as_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Continuous numeric input
    Continuous(f64),
    /// Boolean flag, fed to the model as 1.0 or 0.0
    Flag(bool),
    /// One-hot indicator, always 0 or 1
    Indicator(u8),
}

impl FeatureValue {
    /// One-hot indicator for a condition
    pub fn indicator(hot: bool) -> Self {
        Self::Indicator(u8::from(hot))
    }

    /// Numeric value handed to the classifier
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Continuous(value) => value,
            Self::Flag(flag) => {
                if flag {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Indicator(bit) => f64::from(bit),
        }
    }
}

/// Named feature values in the exact column order of the model schema
///
/// Serializes as a JSON object whose keys follow schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedFeatureVector {
    columns: Vec<(String, FeatureValue)>,
}

impl EncodedFeatureVector {
    pub(crate) fn from_columns(columns: Vec<(String, FeatureValue)>) -> Self {
        Self { columns }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the vector has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value of a column by name
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, FeatureValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// The single numeric row handed to the classifier
    pub fn to_row(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, value)| value.as_f64()).collect()
    }
}

impl Serialize for EncodedFeatureVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of scoring one idea
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Probability of the success class, in `[0, 1]`
    pub success_probability: f64,
    /// The encoded row the classifier was invoked with
    pub input_data: EncodedFeatureVector,
}
