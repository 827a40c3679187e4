pub mod provider;
pub mod firecrawl;

pub use provider::ContentFetcher;
pub use firecrawl::{normalize_url, FirecrawlFetcher};
