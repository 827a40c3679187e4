use async_trait::async_trait;
use crate::error::Result;

/// Model output exactly as received, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub raw_text: String,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// `text` must be non-empty after trimming.
    async fn analyze(&self, text: &str) -> Result<RawModelResponse>;
    fn name(&self) -> &str;
}
