//! High-level builder API for wiring a `Slurper` against the real services

use anyhow::{Context, Result};
use chrono::Utc;
use stackslurp_core::config::{DEFAULT_MESSAGE_TTL, DEFAULT_POLL_INTERVAL};
use stackslurp_core::{
    DeliveryConfig, Slurper, SlurperConfig, StackExchangeProvider, MAX_BATCH_SIZE,
};
use stackslurp_rackspace::{CloudQueuesClient, RackspaceIdentity};
use stackslurp_stackexchange::StackExchangeClient;
use stackslurp_types::{TagFilter, Watermark};
use std::sync::Arc;
use std::time::Duration;

/// Fluent builder for a StackExchange to Cloud Queues slurper
///
/// # Example
///
/// ```rust,no_run
/// use stackslurp::prelude::*;
/// use std::time::Duration;
///
/// # fn main() -> Result<()> {
/// let slurper = SlurperBuilder::new()
///     .sites(["stackoverflow"])
///     .tags("python;ruby")
///     .stackexchange_key("STACKEXCHANGE_API_KEY")
///     .rackspace("rgbkrk", "RACKSPACE_API_KEY")
///     .queue("some_queue_name", "https://dfw.queues.api.rackspacecloud.com/v1/")
///     .poll_interval(Duration::from_secs(300))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SlurperBuilder {
    // StackExchange
    sites: Vec<String>,
    tags: Option<TagFilter>,
    stackexchange_key: Option<String>,
    search_url: Option<String>,

    // Rackspace
    username: Option<String>,
    api_key: Option<String>,
    identity_endpoint: Option<String>,
    queue: Option<String>,
    queue_endpoint: Option<String>,

    // Timing and delivery
    starting_since: Option<Watermark>,
    poll_interval: Duration,
    message_ttl: u32,
    batch_size: usize,
}

impl Default for SlurperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SlurperBuilder {
    pub fn new() -> Self {
        Self {
            sites: Vec::new(),
            tags: None,
            stackexchange_key: None,
            search_url: None,
            username: None,
            api_key: None,
            identity_endpoint: None,
            queue: None,
            queue_endpoint: None,
            starting_since: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            message_ttl: DEFAULT_MESSAGE_TTL,
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Sites to search, queried in this order (e.g. "stackoverflow")
    pub fn sites<I, S>(mut self, sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sites = sites.into_iter().map(Into::into).collect();
        self
    }

    /// Tags to match, as a list or an already `;`-joined string (required)
    pub fn tags(mut self, tags: impl Into<TagFilter>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn stackexchange_key(mut self, key: impl Into<String>) -> Self {
        self.stackexchange_key = Some(key.into());
        self
    }

    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = Some(url.into());
        self
    }

    /// Rackspace username and API key (required)
    pub fn rackspace(mut self, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.api_key = Some(api_key.into());
        self
    }

    pub fn identity_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.identity_endpoint = Some(endpoint.into());
        self
    }

    /// Destination queue name and Cloud Queues endpoint (required)
    pub fn queue(mut self, name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        self.queue = Some(name.into());
        self.queue_endpoint = Some(endpoint.into());
        self
    }

    /// Where the first fetch starts (default: 24 hours ago)
    pub fn starting_since(mut self, since: Watermark) -> Self {
        self.starting_since = Some(since);
        self
    }

    /// Wait between iterations (default: 10 minutes)
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Message time-to-live in seconds (default: 86400)
    pub fn message_ttl(mut self, ttl: u32) -> Self {
        self.message_ttl = ttl;
        self
    }

    /// Messages per queue post (default and maximum: 10)
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Build the slurper
    ///
    /// # Errors
    ///
    /// Returns an error if tags, Rackspace credentials or the queue are not
    /// set, or if the resulting configuration is out of range.
    pub fn build(self) -> Result<Slurper> {
        let tags = self
            .tags
            .filter(|t| !t.is_empty())
            .context("At least one tag is required. Call .tags(...)")?;
        let username = self
            .username
            .context("Rackspace username is required. Call .rackspace(username, api_key)")?;
        let api_key = self.api_key.context("Rackspace API key is required")?;
        let queue = self
            .queue
            .context("Queue is required. Call .queue(name, endpoint)")?;
        let queue_endpoint = self.queue_endpoint.context("Queue endpoint is required")?;

        if let Some(site) = self.sites.iter().find(|s| s.trim().is_empty()) {
            anyhow::bail!("Site names must not be empty (got {:?})", site);
        }

        let mut search = StackExchangeClient::new().context("Failed to create search client")?;
        if let Some(url) = self.search_url {
            search = search.with_search_url(url);
        }

        let mut identity = RackspaceIdentity::new().context("Failed to create identity client")?;
        if let Some(endpoint) = self.identity_endpoint {
            identity = identity.with_endpoint(endpoint);
        }

        let queues = CloudQueuesClient::new().context("Failed to create queue client")?;

        let provider = StackExchangeProvider::new(Arc::new(search), self.sites, tags)
            .with_api_key(self.stackexchange_key);

        let delivery = DeliveryConfig::new(queue, queue_endpoint, username, api_key)
            .with_message_ttl(self.message_ttl)
            .with_batch_size(self.batch_size);
        let starting_since = self
            .starting_since
            .unwrap_or_else(|| Watermark::day_before(Utc::now()));
        let config =
            SlurperConfig::new(starting_since, delivery).with_poll_interval(self.poll_interval);

        Slurper::new(
            Arc::new(provider),
            Arc::new(identity),
            Arc::new(queues),
            config,
        )
        .context("Invalid slurper configuration")
    }
}
