// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Feedback prompt construction

use shared_types::FeedbackRequest;

/// System message framing the assistant
pub const SYSTEM_MESSAGE: &str = "You are an expert in evaluating product and startup ideas.";

/// System and user messages for one feedback request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPrompt {
    /// System-role message
    pub system: String,
    /// User-role message
    pub user: String,
}

impl FeedbackPrompt {
    /// Build the prompt for an idea
    ///
    /// Name and description are embedded verbatim.
    pub fn for_idea(request: &FeedbackRequest) -> Self {
        Self {
            system: SYSTEM_MESSAGE.to_string(),
            user: user_message(&request.idea_name, &request.idea_description),
        }
    }
}

fn user_message(idea_name: &str, idea_description: &str) -> String {
    format!(
        "You are a product strategist. Analyze the following startup idea and explain \
         in plain English whether it shows potential, any risks, or what could make it better.\n\n\
         Idea Name: {idea_name}\n\
         Idea Description: {idea_description}\n\n\
         Respond in 4-5 clear and concise sentences."
    )
}
