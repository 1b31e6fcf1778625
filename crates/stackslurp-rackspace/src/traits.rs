use async_trait::async_trait;
use serde_json::Value;
use stackslurp_types::{AuthToken, EnqueueReceipt, Result};
use uuid::Uuid;

/// Exchanges long-lived credentials for a short-lived bearer token
///
/// No caching and no retry: callers authenticate again before every send cycle.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn authenticate(&self, username: &str, api_key: &str) -> Result<AuthToken>;
}

/// Posts batches of JSON messages to a named queue
///
/// Callers pre-split messages into groups the queue accepts (at most 10);
/// implementations send what they are given in a single request.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Identifier sent with every request, stable for the client's lifetime
    fn client_id(&self) -> Uuid;

    async fn enqueue(
        &self,
        messages: &[Value],
        queue: &str,
        endpoint: &str,
        token: &AuthToken,
        ttl: u32,
    ) -> Result<EnqueueReceipt>;
}
