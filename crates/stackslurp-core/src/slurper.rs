use crate::batcher::Batcher;
use crate::config::SlurperConfig;
use crate::provider::{Harvest, SourceProvider};
use serde_json::Value;
use stackslurp_rackspace::{IdentityClient, QueueClient};
use stackslurp_types::{Event, Result, SlurpError, Watermark};
use std::future::Future;
use std::sync::Arc;

/// What one iteration did
#[derive(Debug)]
pub enum IterationOutcome {
    /// Fetch succeeded but found nothing new; nothing was sent
    Idle,
    Delivered { events: usize, report: SendReport },
    /// Fetch failed; the watermark was left where it was
    FetchFailed(SlurpError),
    /// Fetch succeeded and the watermark advanced, but delivery failed.
    /// The events of this window are dropped, not retried.
    SendFailed { events: usize, error: SlurpError },
}

impl IterationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            IterationOutcome::FetchFailed(_) | IterationOutcome::SendFailed { .. }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    pub batches: usize,
    pub messages: usize,
    pub resources: usize,
}

/// Polling orchestrator: fetch, map, authenticate, batch, send, sleep, repeat
///
/// Owns the watermark. It only moves forward, and only after a fetch that
/// returned at least one question.
pub struct Slurper {
    provider: Arc<dyn SourceProvider>,
    identity: Arc<dyn IdentityClient>,
    queue: Arc<dyn QueueClient>,
    batcher: Batcher,
    config: SlurperConfig,
    watermark: Watermark,
    iterations: u64,
}

impl Slurper {
    pub fn new(
        provider: Arc<dyn SourceProvider>,
        identity: Arc<dyn IdentityClient>,
        queue: Arc<dyn QueueClient>,
        config: SlurperConfig,
    ) -> Result<Self> {
        config.validate()?;
        let batcher = Batcher::new(config.delivery.batch_size)?;

        Ok(Self {
            provider,
            identity,
            queue,
            batcher,
            watermark: config.starting_since,
            config,
            iterations: 0,
        })
    }

    pub fn watermark(&self) -> Watermark {
        self.watermark
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &SlurperConfig {
        &self.config
    }

    /// Run one fetch/map/send pass without sleeping
    pub async fn run_once(&mut self) -> IterationOutcome {
        self.iterations += 1;

        let harvest = match self.fetch().await {
            Ok(harvest) => harvest,
            Err(error) => {
                tracing::error!(
                    phase = error.phase(),
                    provider = self.provider.name(),
                    since = self.watermark.as_secs(),
                    "Event generation failed: {}",
                    error
                );
                return IterationOutcome::FetchFailed(error);
            }
        };

        self.advance(&harvest);

        if harvest.is_empty() {
            tracing::info!(since = self.watermark.as_secs(), "No new events");
            return IterationOutcome::Idle;
        }

        let events = harvest.events.len();
        match self.send_events(&harvest.events).await {
            Ok(report) => {
                tracing::info!(
                    events,
                    batches = report.batches,
                    queue = %self.config.delivery.queue,
                    "Events delivered"
                );
                IterationOutcome::Delivered { events, report }
            }
            Err(error) => {
                tracing::error!(
                    phase = error.phase(),
                    queue = %self.config.delivery.queue,
                    events,
                    "Event sending failed: {}",
                    error
                );
                IterationOutcome::SendFailed { events, error }
            }
        }
    }

    /// Loop until `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping, so a started iteration
    /// always runs to completion.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.run_once().await;

            tracing::info!(
                seconds = self.config.poll_interval.as_secs(),
                watermark = self.watermark.as_secs(),
                "Sleeping"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                _ = &mut shutdown => {
                    tracing::info!(iterations = self.iterations, "Shutdown requested, stopping");
                    break;
                }
            }
        }
    }

    /// Loop forever
    pub async fn run(&mut self) {
        self.run_until(std::future::pending()).await
    }

    async fn fetch(&self) -> Result<Harvest> {
        tracing::debug!(since = self.watermark.as_secs(), "Fetching events");
        self.provider.produce_events(self.watermark).await
    }

    fn advance(&mut self, harvest: &Harvest) {
        if let Some(newest) = harvest.newest {
            let next = self.watermark.advanced_past(newest);
            tracing::debug!(from = self.watermark.as_secs(), to = next.as_secs(), "Advancing watermark");
            self.watermark = next;
        }
    }

    /// Authenticate, then post `events` in order in batches
    pub async fn send_events(&self, events: &[Event]) -> Result<SendReport> {
        if events.is_empty() {
            return Ok(SendReport::default());
        }

        let delivery = &self.config.delivery;
        let messages = events
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(|e| SlurpError::EnqueueFailed {
                queue: delivery.queue.clone(),
                status: None,
                body: format!("failed to serialize event: {}", e),
            })?;

        // Fresh token every send cycle
        let token = self
            .identity
            .authenticate(&delivery.username, &delivery.api_key)
            .await?;

        let mut report = SendReport::default();
        for batch in self.batcher.batches(&messages) {
            let receipt = self
                .queue
                .enqueue(
                    batch,
                    &delivery.queue,
                    &delivery.queue_endpoint,
                    &token,
                    delivery.message_ttl,
                )
                .await?;
            report.batches += 1;
            report.messages += batch.len();
            report.resources += receipt.resources.len();
        }

        Ok(report)
    }
}
