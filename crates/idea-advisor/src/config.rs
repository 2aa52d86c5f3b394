// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! OpenAI client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{IdeaAdvisorError, IdeaAdvisorResult};

/// Model used for idea feedback
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for idea feedback
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens, enough for four or five sentences
pub const DEFAULT_MAX_TOKENS: u32 = 250;

/// Client-side timeout for one completion round-trip
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// OpenAI API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// OpenAI API key
    pub api_key: String,
    /// Base URL for OpenAI API (defaults to official API)
    pub base_url: Option<Url>,
    /// Chat model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens in the response
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Organization ID (optional)
    pub organization_id: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            organization_id: None,
        }
    }
}

impl OpenAiConfig {
    /// Create a new OpenAI configuration
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    /// Set the base URL for the OpenAI API
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Validate the OpenAI configuration
    pub fn validate(&self) -> IdeaAdvisorResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(IdeaAdvisorError::config("OpenAI API key cannot be empty"));
        }

        if self.model.trim().is_empty() {
            return Err(IdeaAdvisorError::config("OpenAI model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(IdeaAdvisorError::config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(IdeaAdvisorError::config("max_tokens must be greater than 0"));
        }

        if self.timeout_seconds == 0 {
            return Err(IdeaAdvisorError::config(
                "timeout_seconds must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_feedback_settings() {
        let config = OpenAiConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 250);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn validation() {
        assert!(OpenAiConfig::default().validate().is_err());
        assert!(OpenAiConfig::new("sk-test".into()).validate().is_ok());

        let mut config = OpenAiConfig::new("sk-test".into());
        config.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = OpenAiConfig::new("sk-test".into());
        config.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = OpenAiConfig::new("sk-test".into());
        config.model = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = OpenAiConfig::new("sk-test".into());
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
