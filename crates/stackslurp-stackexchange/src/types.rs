use serde::{Deserialize, Serialize};
use stackslurp_types::{RawQuestion, TagFilter, Watermark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    Desc,
    Asc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    Creation,
    Activity,
    Votes,
}

/// Query string of a `/search` request
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery<'a> {
    pub fromdate: i64,
    pub order: SearchOrder,
    pub sort: SearchSort,
    pub tagged: &'a str,
    pub site: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    /// Newest-first query for questions created at or after `since`
    pub fn new(since: Watermark, tags: &'a TagFilter, site: &'a str, key: Option<&'a str>) -> Self {
        Self {
            fromdate: since.as_secs(),
            order: SearchOrder::Desc,
            sort: SearchSort::Creation,
            tagged: tags.as_str(),
            site,
            key: key.filter(|k| !k.is_empty()),
        }
    }
}

/// Envelope returned by the search API
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawQuestion>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub quota_remaining: Option<u64>,
    /// Seconds the API asks callers to wait before hitting the same method again
    #[serde(default)]
    pub backoff: Option<u64>,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error_id: Option<u32>,
    pub error_name: Option<String>,
    pub error_message: Option<String>,
}
