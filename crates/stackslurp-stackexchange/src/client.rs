// StackExchange search client (HTTP direct, no SDK)

use crate::traits::QuestionSource;
use crate::types::{ApiErrorBody, SearchQuery, SearchResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use stackslurp_types::{RawQuestion, Result, SlurpError, TagFilter, Watermark};

pub const STACKEXCHANGE_SEARCH_API: &str = "https://api.stackexchange.com/2.1/search";

/// Client for the StackExchange `/search` method
///
/// Only the first page of results is consumed. Responses are always
/// compressed by the API; decompression is handled by the HTTP client.
#[derive(Debug, Clone)]
pub struct StackExchangeClient {
    http_client: reqwest::Client,
    search_url: String,
}

impl StackExchangeClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| SlurpError::ConfigInvalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            search_url: STACKEXCHANGE_SEARCH_API.to_string(),
        })
    }

    /// Point the client at a different search endpoint (mirrors, tests)
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    fn failed(site: &str, cause: impl Into<String>) -> SlurpError {
        SlurpError::SourceQueryFailed {
            site: site.to_string(),
            cause: cause.into(),
        }
    }

    /// Describe a non-success response, preferring the API's own error envelope
    fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody {
                error_id,
                error_name: Some(name),
                error_message,
            }) => format!(
                "HTTP {} ({} {}): {}",
                status,
                error_id.map(|id| id.to_string()).unwrap_or_default(),
                name,
                error_message.unwrap_or_default()
            ),
            _ => format!("HTTP {}: {}", status, body),
        }
    }
}

#[async_trait]
impl QuestionSource for StackExchangeClient {
    async fn search(
        &self,
        since: Watermark,
        tags: &TagFilter,
        site: &str,
        api_key: Option<&str>,
    ) -> Result<Vec<RawQuestion>> {
        if site.trim().is_empty() {
            return Err(Self::failed(site, "site must not be empty"));
        }
        if tags.is_empty() {
            return Err(Self::failed(site, "at least one tag is required"));
        }

        let query = SearchQuery::new(since, tags, site, api_key);
        tracing::debug!(
            site = %site,
            tagged = %tags,
            fromdate = since.as_secs(),
            "Querying StackExchange search"
        );

        let response = self
            .http_client
            .get(&self.search_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::failed(site, format!("request error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::failed(site, format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(Self::failed(site, Self::describe_error(status, &body)));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| Self::failed(site, format!("failed to parse response: {}", e)))?;

        if parsed.has_more {
            tracing::warn!(
                site = %site,
                "Search returned more than one page; only the first page is consumed"
            );
        }
        if let Some(backoff) = parsed.backoff {
            tracing::warn!(site = %site, backoff_secs = backoff, "StackExchange requested a backoff");
        }
        if let Some(quota) = parsed.quota_remaining {
            tracing::debug!(site = %site, quota_remaining = quota, "StackExchange quota");
        }

        tracing::info!(site = %site, count = parsed.items.len(), "Fetched questions");
        Ok(parsed.items)
    }
}
