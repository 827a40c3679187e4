use std::time::Duration;
use thiserror::Error;

/// Every variant's message is meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Fetch(String),

    #[error("Could not extract enough text from {0}. Try pasting the text content directly instead.")]
    InsufficientContent(String),

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("AI service requires additional credits.")]
    QuotaExhausted,

    #[error("Failed to analyze sentiment: {0}")]
    LLMApi(String),

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited | Error::Network(_) | Error::Timeout(_))
    }
}
