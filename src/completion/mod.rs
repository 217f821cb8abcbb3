//! The completion client. One provider call per submission; responses are
//! normalized, failures classified and usage accounted best-effort.

pub mod normalize;
pub mod openai;
pub mod scripted;
pub mod usage;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AccountingFailure, FailureKind, ProviderFailure};
use crate::request::GenerationParams;

use normalize::{RawResponse, normalize};
pub use usage::{UsageCounter, UsageTotals};

/// A chat message sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Body of a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl ChatRequest {
    pub fn new(
        model: &str,
        system_instruction: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_instruction.to_string(),
                },
                Message {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// An unclassified provider error.
///
/// `type_name` plays the role of an exception class name
/// (`RateLimitError`, `APIConnectionError`, ...). `reached_provider` is
/// false when the request never got a response, e.g. DNS or connect errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub type_name: String,
    pub message: String,
    pub reached_provider: bool,
}

impl ProviderError {
    /// The provider answered with an error.
    pub fn response(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            reached_provider: true,
        }
    }

    /// The request never produced a response.
    pub fn transport(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            reached_provider: false,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for ProviderError {}

/// A language-model completion service.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<RawResponse, ProviderError>;
}

/// Token figures as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// What one successful provider call produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    pub text: Option<String>,
    pub model: Option<String>,
    pub usage: TokenUsage,
    /// Tokens added to the usage counter for this call.
    pub tallied_tokens: u64,
    pub requested_max_tokens: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletionResult {
    pub fn model_or_unknown(&self) -> &str {
        self.model.as_deref().unwrap_or("unknown")
    }
}

/// Outcome of [`CompletionClient::invoke`]. Provider failures are data,
/// never panics; an accounting problem rides along without failing the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub outcome: Result<CompletionResult, ProviderFailure>,
    pub accounting: Option<AccountingFailure>,
}

/// Classify a provider error by case-insensitive keyword matching over its
/// type name and message. First match wins.
pub fn classify(err: &ProviderError) -> FailureKind {
    let haystack = [err.type_name.to_lowercase(), err.message.to_lowercase()];

    if mentions(&haystack, &["rate", "ratelimit"]) {
        FailureKind::RateLimited
    } else if mentions(&haystack, &["auth", "authentication"]) {
        FailureKind::AuthenticationFailed
    } else if mentions(&haystack, &["connection"]) {
        FailureKind::ConnectionFailed
    } else if mentions(&haystack, &["invalid"]) {
        FailureKind::InvalidRequest
    } else {
        FailureKind::Unknown
    }
}

fn mentions(haystack: &[String], keywords: &[&str]) -> bool {
    haystack
        .iter()
        .any(|text| keywords.iter().any(|k| text.contains(k)))
}

/// Sends composed prompts to a [`Provider`] and accounts for usage.
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    usage: Arc<UsageCounter>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, usage: Arc<UsageCounter>) -> Self {
        Self {
            provider,
            model: model.into(),
            usage,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn usage(&self) -> &Arc<UsageCounter> {
        &self.usage
    }

    pub async fn invoke(
        &self,
        system_instruction: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Invocation {
        let request = ChatRequest::new(&self.model, system_instruction, user_prompt, params);
        debug!(
            model = %self.model,
            temperature = params.temperature,
            top_p = params.top_p,
            max_tokens = params.max_tokens,
            "sending completion request"
        );

        match self.provider.complete(&request).await {
            Ok(raw) => {
                let normalized = normalize(raw);
                let tallied_tokens = normalized.usage.tally();
                let accounting = self.account(tallied_tokens);
                if normalized.text.is_none() {
                    warn!("provider response carried no content");
                }

                let result = CompletionResult {
                    text: normalized.text,
                    model: normalized.model,
                    usage: TokenUsage {
                        prompt_tokens: normalized.usage.prompt_tokens,
                        completion_tokens: normalized.usage.completion_tokens,
                        total_tokens: normalized.usage.total_tokens,
                    },
                    tallied_tokens,
                    requested_max_tokens: params.max_tokens,
                    completed_at: Utc::now(),
                };
                Invocation {
                    outcome: Ok(result),
                    accounting,
                }
            }
            Err(err) => {
                let accounting = if err.reached_provider {
                    self.account(0)
                } else {
                    None
                };
                let kind = classify(&err);
                warn!(?kind, error = %err, "completion request failed");
                Invocation {
                    outcome: Err(ProviderFailure {
                        kind,
                        detail: err.message,
                    }),
                    accounting,
                }
            }
        }
    }

    fn account(&self, tokens: u64) -> Option<AccountingFailure> {
        match self.usage.record(tokens) {
            Ok(totals) => {
                debug!(
                    tokens,
                    total_tokens = totals.total_tokens,
                    requests = totals.requests,
                    "usage recorded"
                );
                None
            }
            Err(failure) => {
                warn!(error = %failure, "usage accounting skipped");
                Some(failure)
            }
        }
    }
}
