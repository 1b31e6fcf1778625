use async_trait::async_trait;
use stackslurp_types::{RawQuestion, Result, TagFilter, Watermark};

/// Source of tagged questions on a named site
///
/// Returns the first page of questions created at or after `since`, newest
/// first. Any transport error or non-success status is reported as
/// `SlurpError::SourceQueryFailed` for the whole site.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn search(
        &self,
        since: Watermark,
        tags: &TagFilter,
        site: &str,
        api_key: Option<&str>,
    ) -> Result<Vec<RawQuestion>>;
}
