//! Error taxonomy shared by the request builder, the completion client and
//! the assistant.
//!
//! Every failure the front end can see maps to one [`ErrorKind`] and renders
//! as a short, human-readable message. Raw provider text only surfaces for
//! [`ErrorKind::InvalidRequest`] and [`ErrorKind::UnknownProviderError`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::locale::Locale;

/// Stable, serializable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    InputTooLong,
    UnknownTask,
    InvalidParameter,
    MissingPlaceholder,
    RateLimited,
    AuthenticationFailed,
    ConnectionFailed,
    InvalidRequest,
    UnknownProviderError,
    NoContent,
    AccountingFailure,
    MissingCredential,
}

/// Why raw user text was rejected before any provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("input is empty")]
    Empty,
    #[error("input exceeds {max} characters ({actual})")]
    TooLong { max: usize, actual: usize },
}

/// Category of a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    RateLimited,
    AuthenticationFailed,
    ConnectionFailed,
    InvalidRequest,
    Unknown,
}

/// A classified provider failure. `detail` is the provider's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ProviderFailure {}

impl ProviderFailure {
    /// Message safe to show to the user.
    pub fn user_message(&self) -> String {
        match self.kind {
            FailureKind::RateLimited => {
                "API rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            FailureKind::AuthenticationFailed => {
                "Authentication error. Please check your API key configuration.".to_string()
            }
            FailureKind::ConnectionFailed => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            FailureKind::InvalidRequest => format!("Invalid request: {}", self.detail),
            FailureKind::Unknown => {
                format!("Error contacting the completion API: {}", self.detail)
            }
        }
    }

    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            FailureKind::RateLimited => ErrorKind::RateLimited,
            FailureKind::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            FailureKind::ConnectionFailed => ErrorKind::ConnectionFailed,
            FailureKind::InvalidRequest => ErrorKind::InvalidRequest,
            FailureKind::Unknown => ErrorKind::UnknownProviderError,
        }
    }
}

/// The usage counter could not be updated. Never fails the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token accounting failed to update: {0}")]
pub struct AccountingFailure(pub String);

impl AccountingFailure {
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: ErrorKind::AccountingFailure,
            message: "Token accounting failed to update; check server logs.".to_string(),
        }
    }
}

/// Everything the assistant can report back to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssistError {
    #[error(transparent)]
    Input(#[from] InvalidInput),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("template `{task}` is missing placeholder {placeholder}")]
    MissingPlaceholder {
        task: String,
        placeholder: &'static str,
    },

    #[error(transparent)]
    Provider(#[from] ProviderFailure),

    #[error("the model returned no content")]
    NoContent { model: Option<String> },

    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
}

impl AssistError {
    pub fn unknown_task(id: impl Into<String>) -> Self {
        Self::UnknownTask(id.into())
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(InvalidInput::Empty) => ErrorKind::EmptyInput,
            Self::Input(InvalidInput::TooLong { .. }) => ErrorKind::InputTooLong,
            Self::UnknownTask(_) => ErrorKind::UnknownTask,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::MissingPlaceholder { .. } => ErrorKind::MissingPlaceholder,
            Self::Provider(failure) => failure.error_kind(),
            Self::NoContent { .. } => ErrorKind::NoContent,
            Self::MissingCredential(_) => ErrorKind::MissingCredential,
        }
    }

    /// Short message for display, localized where a translation exists.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Input(InvalidInput::Empty), Locale::English) => {
                "Please provide input before running the assistant.".to_string()
            }
            (Self::Input(InvalidInput::Empty), Locale::German) => {
                "Bitte geben Sie eine Eingabe ein, bevor Sie den Assistenten starten.".to_string()
            }
            (Self::Input(InvalidInput::TooLong { max, .. }), Locale::English) => {
                format!("Input too long. Maximum {max} characters allowed.")
            }
            (Self::Input(InvalidInput::TooLong { max, .. }), Locale::German) => {
                format!("Eingabe zu lang. Maximum {max} Zeichen erlaubt.")
            }
            (Self::UnknownTask(_), _) => "Selected task not implemented.".to_string(),
            (Self::MissingPlaceholder { .. }, _) => {
                "Selected task has a malformed prompt template.".to_string()
            }
            (Self::Provider(failure), _) => failure.user_message(),
            (Self::NoContent { .. }, _) => {
                "The model returned an empty response. Please try again.".to_string()
            }
            (other, _) => other.to_string(),
        }
    }

    pub fn report(&self, locale: Locale) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.user_message(locale),
        }
    }
}

/// Outbound failure shape handed to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}
