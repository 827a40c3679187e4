use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::Result;
use crate::models::ScrapeResult;
use crate::scraper::provider::ContentFetcher;

const UNSUPPORTED_MARKERS: [&str; 2] = ["not currently supported", "enterprise"];

pub struct FirecrawlFetcher {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    wait_for_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    only_main_content: bool,
    wait_for: u64,
}

impl FirecrawlFetcher {
    pub fn new(api_key: Option<String>, api_url: impl Into<String>, wait_for_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(wait_for_ms + 60_000))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_url: api_url.into(),
            wait_for_ms,
        })
    }
}

#[async_trait]
impl ContentFetcher for FirecrawlFetcher {
    async fn fetch(&self, url: &str) -> ScrapeResult {
        let Some(api_key) = self.api_key.as_deref() else {
            return ScrapeResult::failure(
                "URL scraping is not configured. Set FIRECRAWL_API_KEY or paste the text content directly instead.",
            );
        };

        let formatted_url = normalize_url(url);
        tracing::info!("Scraping URL: {}", formatted_url);

        let request_body = ScrapeRequest {
            url: &formatted_url,
            formats: ["markdown"],
            only_main_content: true,
            wait_for: self.wait_for_ms,
        };

        let response = match self
            .client
            .post(&self.api_url)
            .header("authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Scrape request failed: {}", e);
                return ScrapeResult::failure(format!("Failed to scrape URL: {}", e));
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!("Scraping provider error ({}): {}", status, text);
            let body = parse_body(&text);
            return failure_from_response(&formatted_url, status, body["error"].as_str());
        }

        // The provider has returned both `{data: {markdown, metadata}}` and a
        // flat `{markdown, metadata}` body. Fields of any other shape read as
        // absent.
        let body = parse_body(&text);
        let content = body["data"]["markdown"]
            .as_str()
            .filter(|m| !m.is_empty())
            .or_else(|| body["markdown"].as_str())
            .unwrap_or_default()
            .to_string();
        let metadata = body["data"]["metadata"]
            .as_object()
            .or_else(|| body["metadata"].as_object())
            .map(flatten_metadata)
            .unwrap_or_default();

        tracing::info!("Scrape successful, content length: {}", content.len());
        ScrapeResult::success(content, metadata)
    }

    fn name(&self) -> &str {
        "Firecrawl"
    }
}

fn parse_body(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Scrape response is not JSON ({}): {}", e, text);
            Value::Null
        }
    }
}

fn failure_from_response(url: &str, status: reqwest::StatusCode, error: Option<&str>) -> ScrapeResult {
    let message = error.unwrap_or_default();

    if UNSUPPORTED_MARKERS.iter().any(|m| message.contains(m)) {
        return ScrapeResult::unsupported(format!(
            "{} is not supported for scraping. Try pasting the text content directly instead.",
            display_domain(url)
        ));
    }

    if message.is_empty() {
        ScrapeResult::failure(format!("Failed to scrape URL (status {})", status.as_u16()))
    } else {
        ScrapeResult::failure(message.to_string())
    }
}

pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn display_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

fn flatten_metadata(raw: &Map<String, Value>) -> HashMap<String, String> {
    raw.iter()
        .filter_map(|(key, value)| {
            let flat = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(items) => {
                    let parts: Vec<String> = items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                    if parts.is_empty() {
                        return None;
                    }
                    parts.join(", ")
                }
                Value::Null | Value::Object(_) => return None,
            };
            Some((key.clone(), flat))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetcher_for(server: &MockServer) -> FirecrawlFetcher {
        FirecrawlFetcher::new(
            Some("test-key".to_string()),
            format!("{}/v1/scrape", server.uri()),
            3_000,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url(" http://example.com/a "), "http://example.com/a");
        assert_eq!(normalize_url("HTTPS://example.com"), "HTTPS://example.com");
    }

    #[test]
    fn test_display_domain_strips_www() {
        assert_eq!(display_domain("https://www.example.com/page"), "example.com");
        assert_eq!(display_domain("https://news.example.com"), "news.example.com");
    }

    #[test]
    fn test_flatten_metadata() {
        let raw = json!({
            "title": "A Review",
            "statusCode": 200,
            "keywords": ["food", "service"],
            "og": {"nested": true},
            "author": null
        });
        let flat = flatten_metadata(raw.as_object().unwrap());

        assert_eq!(flat.get("title").map(String::as_str), Some("A Review"));
        assert_eq!(flat.get("statusCode").map(String::as_str), Some("200"));
        assert_eq!(flat.get("keywords").map(String::as_str), Some("food, service"));
        assert!(!flat.contains_key("og"));
        assert!(!flat.contains_key("author"));
    }

    #[tokio::test]
    async fn test_fetch_nested_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "url": "https://example.com/review",
                "formats": ["markdown"],
                "onlyMainContent": true,
                "waitFor": 3000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "markdown": "# Review\n\nThe food was cold.",
                    "metadata": {"title": "Review"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("example.com/review").await;

        assert!(result.success);
        assert_eq!(result.content, "# Review\n\nThe food was cold.");
        assert_eq!(result.metadata.get("title").map(String::as_str), Some("Review"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_flat_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "markdown": "Flat body content",
                "metadata": {"author": "Sam"}
            })))
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("https://example.com").await;

        assert!(result.success);
        assert_eq!(result.content, "Flat body content");
        assert_eq!(result.metadata.get("author").map(String::as_str), Some("Sam"));
    }

    #[tokio::test]
    async fn test_fetch_empty_content_is_still_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("https://example.com").await;

        assert!(result.success);
        assert_eq!(result.content, "");
        assert!(result.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_keeps_content_when_metadata_is_not_an_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "markdown": "A long enough article body about food.",
                    "metadata": ["unexpected"]
                }
            })))
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("https://example.com").await;

        assert!(result.success);
        assert_eq!(result.content, "A long enough article body about food.");
        assert!(result.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_nested_metadata_of_wrong_shape_uses_flat_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"markdown": 42, "metadata": "none"},
                "markdown": "Flat fallback body",
                "metadata": {"title": "Flat"}
            })))
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("https://example.com").await;

        assert!(result.success);
        assert_eq!(result.content, "Flat fallback body");
        assert_eq!(result.metadata.get("title").map(String::as_str), Some("Flat"));
    }

    #[tokio::test]
    async fn test_fetch_unsupported_site() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "error": "This website is not currently supported. Please reach out for enterprise access."
            })))
            .mount(&server)
            .await;

        let result = fetcher_for(&server)
            .await
            .fetch("https://www.socialsite.com/post/1")
            .await;

        assert!(!result.success);
        assert!(result.unsupported_site);
        let error = result.error.unwrap();
        assert!(error.starts_with("socialsite.com is not supported"));
        assert!(error.contains("pasting the text content directly"));
    }

    #[tokio::test]
    async fn test_fetch_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/scrape"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let result = fetcher_for(&server).await.fetch("example.com").await;

        assert!(!result.success);
        assert!(!result.unsupported_site);
        assert_eq!(result.error.as_deref(), Some("Failed to scrape URL (status 500)"));
    }

    #[tokio::test]
    async fn test_fetch_without_api_key() {
        let fetcher = FirecrawlFetcher::new(None, "http://127.0.0.1:9/v1/scrape", 3_000).unwrap();
        let result = fetcher.fetch("example.com").await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("FIRECRAWL_API_KEY"));
    }
}
