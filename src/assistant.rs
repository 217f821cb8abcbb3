//! One submission from validated input to rendered result.
//!
//! Validation, task lookup, parameter checks and prompt composition all
//! happen before the provider is called; a rejected submission never
//! costs a request.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::completion::{CompletionClient, TokenUsage, UsageCounter};
use crate::error::{AssistError, ErrorReport};
use crate::locale::{Locale, Vendor};
use crate::request::{
    self, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, GenerationParams, GenerationRequest,
};
use crate::templates::{OutputFormat, TemplateRegistry};

/// Per-session input and output caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_input_chars: usize,
    pub max_output_tokens: u32,
}

/// What the front end submits.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
    pub vendor: Vendor,
    pub task_id: String,
    pub user_text: String,
    pub locale: Locale,
    pub temperature: f32,
    pub top_p: f32,
    /// `None` means the configured cap.
    pub max_output_tokens: Option<u32>,
}

impl GenerationInput {
    pub fn new(vendor: Vendor, task_id: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            vendor,
            task_id: task_id.into(),
            user_text: user_text.into(),
            locale: Locale::default(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: None,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// A successful generation, ready to render or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub text: String,
    pub model: String,
    pub usage: TokenUsage,
    pub task_id: String,
    pub vendor: Vendor,
    pub format: OutputFormat,
    pub tallied_tokens: u64,
    pub requested_max_tokens: u32,
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting: Option<ErrorReport>,
}

impl Generation {
    /// Text as the front end shows it. YAML output is fenced.
    pub fn rendered(&self) -> String {
        match self.format {
            OutputFormat::Markdown => self.text.clone(),
            OutputFormat::Yaml if self.text.trim_start().starts_with("```") => self.text.clone(),
            OutputFormat::Yaml => format!("```yaml\n{}\n```", self.text.trim_end()),
        }
    }
}

pub struct Assistant {
    registry: Arc<TemplateRegistry>,
    client: CompletionClient,
    limits: Limits,
}

impl Assistant {
    pub fn new(registry: Arc<TemplateRegistry>, client: CompletionClient, limits: Limits) -> Self {
        Self {
            registry,
            client,
            limits,
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn usage(&self) -> &Arc<UsageCounter> {
        self.client.usage()
    }

    /// Everything up to, but not including, the provider call.
    pub fn prepare(&self, input: &GenerationInput) -> Result<GenerationRequest, AssistError> {
        request::validate(&input.user_text, self.limits.max_input_chars)?;
        let task = self.registry.lookup(&input.task_id)?;

        let max_tokens = match input.max_output_tokens {
            None => self.limits.max_output_tokens,
            Some(n) if (1..=self.limits.max_output_tokens).contains(&n) => n,
            Some(n) => {
                return Err(AssistError::invalid_parameter(
                    "max_output_tokens",
                    format!("{n} is outside 1..={}", self.limits.max_output_tokens),
                ));
            }
        };
        let params = GenerationParams::new(input.temperature, input.top_p, max_tokens)?;
        let prompt = request::compose(task, input.vendor.name(), &input.user_text)?;

        Ok(GenerationRequest {
            vendor: input.vendor,
            task_id: task.id.clone(),
            user_text: input.user_text.clone(),
            locale: input.locale,
            params,
            system_instruction: request::system_instruction(input.locale),
            prompt,
        })
    }

    pub async fn generate(&self, input: &GenerationInput) -> Result<Generation, AssistError> {
        let req = self.prepare(input)?;
        let format = self.registry.lookup(&req.task_id)?.format;
        debug!(task = %req.task_id, vendor = %req.vendor, locale = ?req.locale, "submitting");

        let invocation = self
            .client
            .invoke(&req.system_instruction, &req.prompt, &req.params)
            .await;
        let result = invocation.outcome?;

        let model = result.model_or_unknown().to_string();
        let Some(text) = result.text else {
            return Err(AssistError::NoContent {
                model: result.model,
            });
        };
        info!(task = %req.task_id, %model, tokens = result.tallied_tokens, "generation complete");

        Ok(Generation {
            text,
            model,
            usage: result.usage,
            task_id: req.task_id,
            vendor: req.vendor,
            format,
            tallied_tokens: result.tallied_tokens,
            requested_max_tokens: result.requested_max_tokens,
            completed_at: result.completed_at,
            accounting: invocation.accounting.map(|a| a.report()),
        })
    }
}
