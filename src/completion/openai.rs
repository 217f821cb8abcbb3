use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::normalize::RawResponse;
use super::{ChatRequest, Provider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";

/// Chat completions over HTTP against an OpenAI-compatible endpoint.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            url: format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `reached` is true once a status line has arrived; the attempt then
    /// counts as a provider request even if the body is lost.
    fn connection_error(&self, err: &reqwest::Error, reached: bool) -> ProviderError {
        let message = if err.is_timeout() {
            format!("connection timed out after {}s", self.timeout.as_secs())
        } else if err.is_connect() {
            "connection error".to_string()
        } else {
            format!("connection failed: {err}")
        };
        if reached {
            ProviderError::response("APIConnectionError", message)
        } else {
            ProviderError::transport("APIConnectionError", message)
        }
    }
}

/// Exception-style type name for an HTTP error status.
fn status_type_name(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "InvalidRequestError",
        401 => "AuthenticationError",
        403 => "PermissionDeniedError",
        404 => "NotFoundError",
        409 => "ConflictError",
        422 => "UnprocessableEntityError",
        429 => "RateLimitError",
        500..=599 => "InternalServerError",
        _ => "APIStatusError",
    }
}

/// Pull `error.message` out of an error body, else use the body itself.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    match from_json {
        Some(msg) if !msg.is_empty() => msg,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("HTTP {status}"),
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<RawResponse, ProviderError> {
        debug!(url = %self.url, model = %request.model, "POST chat completion");

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.connection_error(&e, false))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| self.connection_error(&e, true))?;

        if !status.is_success() {
            return Err(ProviderError::response(
                status_type_name(status),
                error_message(status, &body),
            ));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(RawResponse::from_json(value)),
            Err(e) => {
                warn!(error = %e, "completion body is not JSON");
                Ok(RawResponse::Untyped(Value::Null))
            }
        }
    }
}
