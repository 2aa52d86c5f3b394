// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Idea feedback orchestrator

use std::{sync::Arc, time::Instant};

use shared_types::FeedbackRequest;
use tracing::{debug, info, instrument};

use crate::{
    config::OpenAiConfig,
    error::IdeaAdvisorResult,
    openai::OpenAiClient,
    prompt::FeedbackPrompt,
};

/// Produces natural-language feedback on product ideas
///
/// Cheap to clone; the underlying HTTP client and its connection pool are
/// shared.
#[derive(Debug, Clone)]
pub struct IdeaAdvisor {
    openai_client: Arc<OpenAiClient>,
    model: String,
}

impl IdeaAdvisor {
    /// Create an advisor from the OpenAI configuration
    ///
    /// No request is made to the provider here. A key that is set but wrong
    /// only shows up on the first feedback call.
    pub fn new(config: &OpenAiConfig) -> IdeaAdvisorResult<Self> {
        let openai_client = Arc::new(OpenAiClient::new(config)?);

        info!(model = %config.model, "IdeaAdvisor initialized");

        Ok(Self {
            openai_client,
            model: config.model.clone(),
        })
    }

    /// Chat model used for feedback
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for feedback on an idea and return its text unchanged
    #[instrument(skip(self, request), fields(idea_name = %request.idea_name))]
    pub async fn feedback(&self, request: &FeedbackRequest) -> IdeaAdvisorResult<String> {
        let start_time = Instant::now();

        let prompt = FeedbackPrompt::for_idea(request);
        let completion = self.openai_client.complete(&prompt).await?;

        debug!(
            model = %completion.model,
            response_length = completion.text.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Idea feedback generated"
        );

        Ok(completion.text)
    }
}
