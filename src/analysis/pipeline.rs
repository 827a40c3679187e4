use std::sync::Arc;

use crate::classifier::classify;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::llm::{normalize, LLMProvider};
use crate::models::{AnalysisRequest, AnalysisResult, ClassifiedInput};
use crate::scraper::ContentFetcher;

/// Turns one submission into an `AnalysisResult`.
///
/// Runs share nothing: each call builds its own intermediate values, so a
/// pipeline can be reused or called concurrently without coordination.
pub struct AnalysisPipeline {
    fetcher: Arc<dyn ContentFetcher>,
    llm: Arc<dyn LLMProvider>,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        fetcher: impl ContentFetcher + 'static,
        llm: impl LLMProvider + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self::from_shared(Arc::new(fetcher), Arc::new(llm), config)
    }

    pub fn from_shared(
        fetcher: Arc<dyn ContentFetcher>,
        llm: Arc<dyn LLMProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            llm,
            config,
        }
    }

    pub async fn run_request(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.run(&request.raw_input).await
    }

    /// The timeout covers the whole run. On expiry the in-flight call is
    /// dropped and `Error::Timeout` is returned.
    pub async fn run(&self, raw: &str) -> Result<AnalysisResult> {
        match tokio::time::timeout(self.config.timeout, self.run_steps(raw)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Analysis exceeded {:?}, abandoning run", self.config.timeout);
                Err(Error::Timeout(self.config.timeout))
            }
        }
    }

    async fn run_steps(&self, raw: &str) -> Result<AnalysisResult> {
        // Step 1: Validate and classify
        let input = classify(raw)?;
        tracing::info!("Input classified as {}", input.kind());

        // Step 2: Resolve the text to analyze
        let text = match input {
            ClassifiedInput::Text(text) => text,
            ClassifiedInput::UrlRef(url) => self.fetch_content(&url).await?,
        };

        // Step 3: Ask the model
        tracing::info!("Requesting sentiment analysis from {}", self.llm.name());
        let response = self.llm.analyze(&text).await?;

        // Step 4: Normalize whatever came back
        let normalized = normalize(&response.raw_text);
        if normalized.is_fallback() {
            tracing::warn!("Model output was malformed, returning degraded result");
        }

        let result = normalized.into_result();
        tracing::info!(
            "Analysis complete: {} ({:.2}, confidence {:.2})",
            result.overall_sentiment,
            result.overall_score,
            result.confidence
        );
        Ok(result)
    }

    async fn fetch_content(&self, url: &str) -> Result<String> {
        tracing::info!("Fetching content from {} via {}", url, self.fetcher.name());
        let scraped = self.fetcher.fetch(url).await;

        if !scraped.success {
            let message = scraped
                .error
                .unwrap_or_else(|| "Failed to scrape URL".to_string());
            tracing::warn!("Content fetch failed: {}", message);
            return Err(Error::Fetch(message));
        }

        if scraped.content.trim().chars().count() < self.config.min_content_chars {
            return Err(Error::InsufficientContent(url.to_string()));
        }

        if let Some(title) = scraped.metadata.get("title") {
            tracing::debug!("Fetched page title: {}", title);
        }

        Ok(scraped.content)
    }
}
