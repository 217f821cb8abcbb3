//! Runtime settings read from the environment.
//!
//! Everything except the API key has a default. Pass a custom lookup to
//! [`Settings::from_lookup`] in tests instead of touching the process
//! environment.

use std::fmt;
use std::time::Duration;

use crate::completion::openai::DEFAULT_BASE_URL;
use crate::consts::{
    DEFAULT_MAX_INPUT_CHARS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::error::AssistError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "COPILOT_MODEL";
pub const MAX_INPUT_CHARS_VAR: &str = "COPILOT_MAX_INPUT_CHARS";
pub const MAX_OUTPUT_TOKENS_VAR: &str = "COPILOT_MAX_OUTPUT_TOKENS";
pub const TIMEOUT_VAR: &str = "COPILOT_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_input_chars: usize,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, AssistError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AssistError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(AssistError::MissingCredential(API_KEY_VAR))?;

        let max_input_chars = match get(MAX_INPUT_CHARS_VAR) {
            Some(v) => positive(MAX_INPUT_CHARS_VAR, &v)?,
            None => DEFAULT_MAX_INPUT_CHARS,
        };
        let max_output_tokens = match get(MAX_OUTPUT_TOKENS_VAR) {
            Some(v) => positive(MAX_OUTPUT_TOKENS_VAR, &v)?,
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };
        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(v) => positive(TIMEOUT_VAR, &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_input_chars,
            max_output_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// Keep the key out of debug logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_input_chars", &self.max_input_chars)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn positive<T>(name: &'static str, raw: &str) -> Result<T, AssistError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(AssistError::invalid_parameter(
            name,
            format!("expected a positive integer, got '{raw}'"),
        )),
    }
}
