// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! OpenAI chat completions client
//!
//! Sends one system + user message pair to the chat completions endpoint and
//! returns the text of the first choice. Calls are made exactly once: a
//! completion consumes provider quota, so failures are reported rather than
//! retried.

use std::time::{Duration, Instant};

use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize};
use tracing::{Span, debug, error, info, instrument};
use url::Url;
use uuid::Uuid;

use crate::{
    config::OpenAiConfig,
    error::{IdeaAdvisorError, IdeaAdvisorResult},
    prompt::FeedbackPrompt,
};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
const ORGANIZATION_HEADER: &str = "openai-organization";

/// OpenAI Chat Completion API request
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    /// The model to use for completion
    model: &'a str,
    /// List of messages for the conversation
    messages: [ChatMessage<'a>; 2],
    /// Maximum number of tokens to generate
    max_tokens: u32,
    /// Sampling temperature (0.0 to 2.0)
    temperature: f32,
}

/// A single outgoing message in the chat conversation
#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    /// Role of the message sender
    role: &'static str,
    /// Content of the message
    content: &'a str,
}

/// OpenAI Chat Completion API response
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    /// Model used for the completion
    model: String,
    /// List of completion choices
    choices: Vec<ChatChoice>,
    /// Token usage information
    usage: Option<TokenUsage>,
}

/// A single completion choice
#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    /// The completion message
    message: ResponseMessage,
    /// Reason the completion finished
    finish_reason: Option<String>,
}

/// Assistant message of a choice
#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    /// Generated text, absent for refusals and tool calls
    content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total number of tokens used
    pub total_tokens: u32,
}

/// OpenAI API error response
#[derive(Debug, Clone, Deserialize)]
struct OpenAiErrorResponse {
    /// Error details
    error: OpenAiError,
}

/// OpenAI API error details
#[derive(Debug, Clone, Deserialize)]
struct OpenAiError {
    /// Error message
    message: String,
    /// Error type
    r#type: Option<String>,
    /// Error code
    code: Option<String>,
}

/// Text produced for a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Content of the first choice
    pub text: String,
    /// Model that produced the completion
    pub model: String,
    /// Token usage for this completion
    pub token_usage: Option<TokenUsage>,
}

/// OpenAI API client for chat completions
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// HTTP client for API requests
    client: Client,
    /// Chat completions endpoint
    endpoint: Url,
    /// Chat model identifier
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum generated tokens
    max_tokens: u32,
    /// Request timeout
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(config: &OpenAiConfig) -> IdeaAdvisorResult<Self> {
        let mut base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_API_URL)
                .map_err(|e| IdeaAdvisorError::config(format!("Invalid default URL: {e}")))?,
        };
        // Ensure base URL ends with slash for proper joining
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let endpoint = base_url
            .join("chat/completions")
            .map_err(|e| IdeaAdvisorError::config(format!("Invalid base URL: {e}")))?;

        let timeout = Duration::from_secs(config.timeout_seconds);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| IdeaAdvisorError::config(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org_id) = &config.organization_id {
            headers.insert(
                HeaderName::from_static(ORGANIZATION_HEADER),
                HeaderValue::from_str(org_id).map_err(|e| {
                    IdeaAdvisorError::config(format!("Invalid organization ID: {e}"))
                })?,
            );
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("idea-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IdeaAdvisorError::http(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Created OpenAI client for {} with model {} and timeout: {}s",
            endpoint, config.model, config.timeout_seconds
        );

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    /// Chat completions endpoint this client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request a completion for `prompt` and return the first choice
    #[instrument(skip(self, prompt), fields(model = %self.model, request_id))]
    pub async fn complete(&self, prompt: &FeedbackPrompt) -> IdeaAdvisorResult<Completion> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", request_id.to_string());

        info!(
            request_id = %request_id,
            prompt_length = prompt.user.len(),
            "Starting chat completion request"
        );

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let start_time = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdeaAdvisorError::timeout(self.timeout.as_secs())
                } else {
                    IdeaAdvisorError::from(e)
                }
            })?;

        let status = response.status();
        let response_text = response.text().await?;

        debug!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = start_time.elapsed().as_millis(),
            "API request completed"
        );

        if !status.is_success() {
            return Err(Self::error_from_response(status, &response_text));
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                IdeaAdvisorError::invalid_response(format!("Failed to parse response: {e}"))
            })?;

        Self::first_choice(completion, request_id)
    }

    /// Build the error for a non-success response
    fn error_from_response(status: StatusCode, response_text: &str) -> IdeaAdvisorError {
        let error_msg = match serde_json::from_str::<OpenAiErrorResponse>(response_text) {
            Ok(error_response) => format!(
                "OpenAI API error ({}): {} (type: {:?}, code: {:?})",
                status.as_u16(),
                error_response.error.message,
                error_response.error.r#type,
                error_response.error.code
            ),
            Err(_) => format!("HTTP {} error: {}", status.as_u16(), response_text),
        };

        error!("{}", error_msg);
        IdeaAdvisorError::from_status(status.as_u16(), error_msg)
    }

    /// Extract the text of the first choice
    fn first_choice(
        completion: ChatCompletionResponse,
        request_id: Uuid,
    ) -> IdeaAdvisorResult<Completion> {
        let ChatCompletionResponse {
            model,
            choices,
            usage,
        } = completion;

        let choice = choices.into_iter().next().ok_or_else(|| {
            IdeaAdvisorError::invalid_response("No choices in completion response")
        })?;

        let text = choice.message.content.ok_or_else(|| {
            IdeaAdvisorError::invalid_response("First choice has no message content")
        })?;

        if let Some(ref usage) = usage {
            debug!(
                request_id = %request_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                finish_reason = ?choice.finish_reason,
                "Token usage statistics"
            );
        }

        Ok(Completion {
            text,
            model,
            token_usage: usage,
        })
    }
}
