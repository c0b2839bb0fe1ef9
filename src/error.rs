//! Error types for card generation.

use std::time::Duration;

/// Maximum length of an upstream error body carried in an error message.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating a card.
#[derive(Debug, thiserror::Error)]
pub enum CardGenError {
    /// Required configuration (e.g. the API key) is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// API key rejected by the service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Quota or rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Server-suggested delay, if any.
        retry_after: Option<Duration>,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered successfully but not in the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The image service succeeded but returned no images.
    #[error("image generation returned no images: {0}")]
    EmptyResult(String),

    /// The structured text response did not match the card schema.
    #[error("failed to parse card content: {0}")]
    Parse(String),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g. writing the rendered card).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`CardGenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing credential or bad settings; no workflow can proceed.
    Configuration,
    /// Remote call failed (transport, auth, quota, unexpected shape).
    Service,
    /// The image service returned zero images.
    EmptyResult,
    /// The content payload did not conform to the schema.
    Parse,
}

impl CardGenError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::EmptyResult(_) => ErrorCategory::EmptyResult,
            Self::Parse(_) => ErrorCategory::Parse,
            Self::Auth(_)
            | Self::Api { .. }
            | Self::RateLimited { .. }
            | Self::Timeout(_)
            | Self::ContentBlocked(_)
            | Self::InvalidRequest(_)
            | Self::Network(_)
            | Self::UnexpectedResponse(_)
            | Self::Decode(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorCategory::Service,
        }
    }

    /// Returns the server-suggested delay, if one was reported.
    ///
    /// Informational only: nothing in this crate retries automatically.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for card generation operations.
pub type Result<T> = std::result::Result<T, CardGenError>;

/// Reads a `Retry-After` header expressed in seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Prepares an upstream error body for display.
///
/// Prefers the `error.message` field of a Google-style JSON error, redacts
/// anything that looks like an API key and truncates long bodies.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| text.trim().to_string());

    let redacted = message
        .split(' ')
        .map(|word| {
            if word.starts_with("AIza") && word.len() > 20 {
                "[REDACTED]"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if redacted.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = redacted.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        redacted
    }
}

/// Maps a non-success response from a Generative Language API endpoint.
pub(crate) fn parse_google_error(
    status: u16,
    text: &str,
    headers: &reqwest::header::HeaderMap,
) -> CardGenError {
    let text = sanitize_error_message(text);
    if status == 404 {
        return CardGenError::InvalidRequest(
            "Model not found. Verify the model name is correct.".into(),
        );
    }
    if status == 429 {
        let retry_after = parse_retry_after(headers).map(Duration::from_secs);
        return CardGenError::RateLimited { retry_after };
    }
    if status == 401 || status == 403 {
        return CardGenError::Auth(text);
    }
    let lower = text.to_lowercase();
    if lower.contains("api key not valid") || lower.contains("api_key_invalid") {
        return CardGenError::Auth(text);
    }
    if lower.contains("safety") || lower.contains("blocked") || lower.contains("prohibited") {
        return CardGenError::ContentBlocked(text);
    }
    CardGenError::Api {
        status,
        message: text,
    }
}
