use async_trait::async_trait;
use crate::models::ScrapeResult;

/// Fetches the main content of a page. Failures are reported inside the
/// returned `ScrapeResult`, never as an error.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ScrapeResult;
    fn name(&self) -> &str;
}
