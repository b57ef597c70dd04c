// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat-completion client for the text-generation service.
//!
//! Handles:
//! - OpenAI-compatible `chat/completions` requests
//! - Error body capture (including quota exhaustion)
//! - API key probing for the `/check_api_key` endpoint

use crate::config::Config;
use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single completion request: one system instruction and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Text-generation backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run a completion and return the candidate texts in order.
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, AppError>;

    /// Whether a credential is configured at all.
    fn has_credentials(&self) -> bool;
}

// ─── Wire format ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

// ─── OpenAI client ───────────────────────────────────────────────

/// OpenAI-compatible chat-completion client.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
        )
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if body.contains(AppError::COMPLETION_QUOTA_EXCEEDED) {
                tracing::warn!(status = status.as_u16(), "Completion API quota exceeded");
                return Err(AppError::CompletionApi(format!(
                    "{} (HTTP {}): {}",
                    AppError::COMPLETION_QUOTA_EXCEEDED,
                    status,
                    body
                )));
            }

            if status.as_u16() == 429 {
                tracing::warn!("Completion API rate limit hit (429)");
            }

            return Err(AppError::CompletionApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::CompletionApi(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::CompletionApi("OPENAI_API_KEY is not configured".to_string())
        })?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(model = %self.model, url = %url, "Sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CompletionApi(e.to_string()))?;

        let parsed = self.check_response_json(response).await?;

        Ok(parsed
            .choices
            .into_iter()
            .map(|choice| choice.message.content.unwrap_or_default())
            .collect())
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

// ─── API key probe ───────────────────────────────────────────────

/// Outcome of probing the completion service with the configured key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiKeyStatus {
    pub valid: bool,
    pub message: String,
    pub quota_exceeded: bool,
}

const PROBE_MAX_TOKENS: u32 = 5;

/// Send a tiny completion to verify the configured credential.
pub async fn check_api_key(completion: &dyn CompletionService) -> ApiKeyStatus {
    if !completion.has_credentials() {
        return ApiKeyStatus {
            valid: false,
            message: "OPENAI_API_KEY is not set.".to_string(),
            quota_exceeded: false,
        };
    }

    let probe = CompletionRequest {
        system: "You are a helpful assistant.".to_string(),
        user: "Hello, is my API key working?".to_string(),
        temperature: None,
        max_tokens: Some(PROBE_MAX_TOKENS),
    };

    match completion.complete(&probe).await {
        Ok(_) => ApiKeyStatus {
            valid: true,
            message: "API key is valid and working.".to_string(),
            quota_exceeded: false,
        },
        Err(e) if e.is_quota_exceeded() => ApiKeyStatus {
            valid: false,
            message: "API key quota has been exceeded.".to_string(),
            quota_exceeded: true,
        },
        Err(e) => {
            tracing::warn!(error = %e, "API key probe failed");
            ApiKeyStatus {
                valid: false,
                message: format!("Error verifying API key: {}", e),
                quota_exceeded: false,
            }
        }
    }
}
