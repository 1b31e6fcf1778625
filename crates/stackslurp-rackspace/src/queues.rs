use crate::traits::QueueClient;
use crate::types::QueueMessage;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use stackslurp_types::{AuthToken, EnqueueReceipt, Result, SlurpError};
use uuid::Uuid;

const CLIENT_ID_HEADER: &str = "Client-ID";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Rackspace Cloud Queues producer
///
/// The client id is generated once per instance and reused for every post;
/// the queue service uses it to window duplicate detection.
#[derive(Debug, Clone)]
pub struct CloudQueuesClient {
    http_client: reqwest::Client,
    client_id: Uuid,
}

impl CloudQueuesClient {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| SlurpError::ConfigInvalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            client_id: Uuid::new_v4(),
        })
    }

    /// `{endpoint}/v1/queues/{queue}/messages`
    ///
    /// The path is absolute, so any path already on the endpoint
    /// (such as a trailing `/v1/`) is replaced.
    pub fn messages_url(endpoint: &str, queue: &str) -> Result<Url> {
        let invalid = |cause: String| SlurpError::EnqueueFailed {
            queue: queue.to_string(),
            status: None,
            body: cause,
        };

        let base = Url::parse(endpoint)
            .map_err(|e| invalid(format!("invalid queue endpoint '{}': {}", endpoint, e)))?;
        base.join(&format!("/v1/queues/{}/messages", queue))
            .map_err(|e| invalid(format!("invalid queue name '{}': {}", queue, e)))
    }
}

#[async_trait]
impl QueueClient for CloudQueuesClient {
    fn client_id(&self) -> Uuid {
        self.client_id
    }

    async fn enqueue(
        &self,
        messages: &[Value],
        queue: &str,
        endpoint: &str,
        token: &AuthToken,
        ttl: u32,
    ) -> Result<EnqueueReceipt> {
        if messages.is_empty() {
            tracing::debug!(queue = %queue, "Nothing to enqueue");
            return Ok(EnqueueReceipt::default());
        }

        let url = Self::messages_url(endpoint, queue)?;
        let payload: Vec<QueueMessage<'_>> = messages
            .iter()
            .map(|body| QueueMessage { ttl, body })
            .collect();

        let response = self
            .http_client
            .post(url)
            .header(CLIENT_ID_HEADER, self.client_id.to_string())
            .header(AUTH_TOKEN_HEADER, token.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SlurpError::EnqueueFailed {
                queue: queue.to_string(),
                status: None,
                body: format!("request error: {}", e),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());

        if !status.is_success() {
            tracing::error!(queue = %queue, status = %status, body = %body, "Enqueue rejected");
            return Err(SlurpError::EnqueueFailed {
                queue: queue.to_string(),
                status: Some(status.as_u16()),
                body,
            });
        }

        let receipt = match serde_json::from_str::<EnqueueReceipt>(&body) {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(
                    queue = %queue,
                    body = %body,
                    "Unreadable enqueue receipt, assuming empty: {}",
                    e
                );
                EnqueueReceipt::default()
            }
        };
        if receipt.partial {
            tracing::warn!(queue = %queue, "Queue reported a partial enqueue");
        }
        tracing::debug!(
            queue = %queue,
            sent = messages.len(),
            created = receipt.resources.len(),
            "Enqueued batch"
        );

        Ok(receipt)
    }
}
