use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_LLM_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1/scrape";

#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_api_url: String,
    pub scrape_wait_ms: u64,
    pub min_content_chars: usize,
    pub analysis_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let llm_api_key = env::var("LLM_API_KEY")
            .map_err(|_| Error::Config("LLM_API_KEY environment variable not set".to_string()))?;

        let llm_api_url = env::var("LLM_API_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_API_URL.to_string());

        let llm_model = env::var("LLM_MODEL")
            .unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let llm_temperature = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.3);

        let firecrawl_api_key = env::var("FIRECRAWL_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let firecrawl_api_url = env::var("FIRECRAWL_API_URL")
            .unwrap_or_else(|_| DEFAULT_FIRECRAWL_API_URL.to_string());

        let scrape_wait_ms = env::var("SCRAPE_WAIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3_000);

        let min_content_chars = env::var("MIN_CONTENT_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let analysis_timeout_secs = env::var("ANALYSIS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        Ok(Self {
            llm_api_key,
            llm_api_url,
            llm_model,
            llm_temperature,
            firecrawl_api_key,
            firecrawl_api_url,
            scrape_wait_ms,
            min_content_chars,
            analysis_timeout_secs,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fetched pages shorter than this (after trimming) are rejected.
    pub min_content_chars: usize,
    /// Upper bound for a whole run, fetch and analysis together.
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 10,
            timeout: Duration::from_secs(120),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            min_content_chars: config.min_content_chars,
            timeout: Duration::from_secs(config.analysis_timeout_secs),
        }
    }
}
