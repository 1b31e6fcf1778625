use crate::mapper::EventMapper;
use async_trait::async_trait;
use stackslurp_stackexchange::QuestionSource;
use stackslurp_types::{Event, Result, TagFilter, Watermark};
use std::sync::Arc;

/// Events produced by one fetch, plus the newest creation date seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    pub events: Vec<Event>,
    pub newest: Option<i64>,
}

impl Harvest {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Anything that can produce events created at or after a watermark
///
/// A failure means nothing from this call may be used; the orchestrator
/// keeps its watermark and retries the same window next cycle.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn produce_events(&self, since: Watermark) -> Result<Harvest>;
}

/// Pulls tagged questions from every configured StackExchange site
pub struct StackExchangeProvider {
    source: Arc<dyn QuestionSource>,
    sites: Vec<String>,
    tags: TagFilter,
    api_key: Option<String>,
    mapper: EventMapper,
}

impl StackExchangeProvider {
    pub fn new(source: Arc<dyn QuestionSource>, sites: Vec<String>, tags: TagFilter) -> Self {
        Self {
            source,
            sites,
            tags,
            api_key: None,
            mapper: EventMapper::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_mapper(mut self, mapper: EventMapper) -> Self {
        self.mapper = mapper;
        self
    }
}

#[async_trait]
impl SourceProvider for StackExchangeProvider {
    fn name(&self) -> &str {
        "stackexchange"
    }

    async fn produce_events(&self, since: Watermark) -> Result<Harvest> {
        let mut questions = Vec::new();

        // Sites run one after another; the first failure fails the whole fetch
        for site in &self.sites {
            let site_questions = self
                .source
                .search(since, &self.tags, site, self.api_key.as_deref())
                .await?;
            questions.extend(site_questions);
        }

        let newest = questions.iter().map(|q| q.creation_date).max();
        let events = self.mapper.map_all(&questions);
        tracing::info!(count = events.len(), "{} Events", events.len());

        Ok(Harvest { events, newest })
    }
}
