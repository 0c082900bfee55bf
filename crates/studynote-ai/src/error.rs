//! Error types for the AI client.

use thiserror::Error;

/// Result type alias for AI operations.
pub type AiResult<T> = Result<T, AiError>;

/// Errors that can occur calling the generative-language API.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured.
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    /// Empty input (nothing to summarize, or no topic given).
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Transport-level failure (connect, timeout, body read).
    #[error("request to generative-language API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("generative-language API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx but the response had no usable candidate text.
    #[error("malformed generative-language API response: {0}")]
    MalformedResponse(String),

    /// The model's text could not be turned into the expected structure.
    #[error("failed to parse model output: {0}")]
    Parse(String),
}
