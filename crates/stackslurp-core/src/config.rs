use crate::batcher::MAX_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use stackslurp_types::{Result, SlurpError, Watermark, MAX_MESSAGE_TTL, MIN_MESSAGE_TTL};
use std::time::Duration;

/// Default time-to-live for queued messages (one day)
pub const DEFAULT_MESSAGE_TTL: u32 = 86_400;

/// Default wait between iterations (ten minutes)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Where and how events are delivered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub queue: String,
    pub queue_endpoint: String,
    pub username: String,
    pub api_key: String,
    pub message_ttl: u32,
    pub batch_size: usize,
}

impl DeliveryConfig {
    pub fn new(
        queue: impl Into<String>,
        queue_endpoint: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            queue: queue.into(),
            queue_endpoint: queue_endpoint.into(),
            username: username.into(),
            api_key: api_key.into(),
            message_ttl: DEFAULT_MESSAGE_TTL,
            batch_size: MAX_BATCH_SIZE,
        }
    }

    pub fn with_message_ttl(mut self, ttl: u32) -> Self {
        self.message_ttl = ttl;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("queue", &self.queue),
            ("queue_endpoint", &self.queue_endpoint),
            ("username", &self.username),
            ("api_key", &self.api_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SlurpError::ConfigInvalid(format!("{} is required", name)));
            }
        }
        if !(MIN_MESSAGE_TTL..=MAX_MESSAGE_TTL).contains(&self.message_ttl) {
            return Err(SlurpError::ConfigInvalid(format!(
                "message_ttl must be between {} and {} seconds, got {}",
                MIN_MESSAGE_TTL, MAX_MESSAGE_TTL, self.message_ttl
            )));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(SlurpError::ConfigInvalid(format!(
                "batch_size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlurperConfig {
    pub starting_since: Watermark,
    pub poll_interval: Duration,
    pub delivery: DeliveryConfig,
}

impl SlurperConfig {
    pub fn new(starting_since: Watermark, delivery: DeliveryConfig) -> Self {
        Self {
            starting_since,
            poll_interval: DEFAULT_POLL_INTERVAL,
            delivery,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(SlurpError::ConfigInvalid(
                "poll interval must be non-zero".to_string(),
            ));
        }
        self.delivery.validate()
    }
}
