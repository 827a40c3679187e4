pub mod config;
pub mod error;
pub mod models;
pub mod classifier;
pub mod scraper;
pub mod llm;
pub mod analysis;
pub mod report;
pub mod samples;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use classifier::classify;
pub use scraper::{ContentFetcher, FirecrawlFetcher};
pub use llm::{ChatCompletionProvider, LLMProvider};
pub use analysis::AnalysisPipeline;
pub use models::{AnalysisResult, ScrapeResult, SentimentLabel};
