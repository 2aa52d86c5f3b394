// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Natural-language feedback on product ideas
//!
//! Wraps an idea name and description in a fixed prompt and relays it to the
//! OpenAI chat completions API. The text of the first choice is returned
//! as-is.
//!
//! # Architecture
//!
//! - [`advisor`]: entry point used by the HTTP layer
//! - [`prompt`]: the fixed system and user messages
//! - [`openai`]: single-shot chat completions client
//! - [`config`]: model, sampling and timeout settings
//! - [`error`]: provider failure types
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use idea_advisor::{IdeaAdvisor, OpenAiConfig};
//! use shared_types::FeedbackRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let advisor = IdeaAdvisor::new(&OpenAiConfig::new("sk-your-api-key".to_string()))?;
//!
//! let feedback = advisor
//!     .feedback(&FeedbackRequest {
//!         idea_name: "MealMate".to_string(),
//!         idea_description: "Plans weekly meals from what is in your fridge".to_string(),
//!     })
//!     .await?;
//!
//! println!("{feedback}");
//! # Ok(())
//! # }
//! ```

pub mod advisor;
pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;

pub use advisor::IdeaAdvisor;
pub use config::OpenAiConfig;
pub use error::{IdeaAdvisorError, IdeaAdvisorResult};
pub use openai::{Completion, OpenAiClient, TokenUsage};
pub use prompt::{FeedbackPrompt, SYSTEM_MESSAGE};
