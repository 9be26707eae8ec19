use serde::Deserialize;
use thiserror::Error;

/// Message shown when an error carries no usable text.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    /// Error reported by the identity service. The message is shown verbatim.
    #[error("{message}")]
    Provider {
        code: Option<String>,
        message: String,
    },
}

impl AppError {
    /// Machine-readable provider error code, when the identity service sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether the identity service refused the request itself. Network,
    /// timeout, and 5xx failures may succeed on a later attempt.
    pub fn is_rejection(&self) -> bool {
        match self {
            AppError::Provider { .. } => true,
            AppError::Http { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Text for the error banner, falling back to a generic message when empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Error body shapes returned by GoTrue. Older endpoints use `msg`/`code`,
/// OAuth-style endpoints use `error`/`error_description`.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Maps a failed identity-service response into `AppError::Provider`.
///
/// Falls back to `AppError::Http` with the sanitized body when the body is not a
/// recognizable provider error.
pub fn provider_error(status: u16, body: &str) -> AppError {
    let Ok(parsed) = serde_json::from_str::<ProviderErrorBody>(body) else {
        return AppError::Http {
            status,
            message: sanitize_body(body),
        };
    };

    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or_else(|| parsed.error.clone())
        .filter(|value| !value.trim().is_empty());
    let Some(message) = message else {
        return AppError::Http {
            status,
            message: sanitize_body(body),
        };
    };

    // `code` is the HTTP status on some endpoints and a string slug on others.
    let code = parsed
        .error_code
        .or_else(|| match parsed.code {
            Some(serde_json::Value::String(value)) => Some(value),
            _ => None,
        })
        .or(parsed.error);

    AppError::Provider {
        code,
        message: truncate(message.trim()),
    }
}

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
pub(crate) fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        truncate(trimmed)
    }
}

fn truncate(value: &str) -> String {
    value.chars().take(MAX_ERROR_CHARS).collect()
}
