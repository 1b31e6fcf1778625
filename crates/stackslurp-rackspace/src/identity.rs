use crate::traits::IdentityClient;
use crate::types::{AuthRequest, IdentityResponse};
use async_trait::async_trait;
use stackslurp_types::{AuthToken, Result, SlurpError};

pub const RACKSPACE_IDENTITY_ENDPOINT: &str = "https://identity.api.rackspacecloud.com/v2.0/tokens";

/// Rackspace identity (Keystone v2 with the RAX-KSKEY extension)
#[derive(Debug, Clone)]
pub struct RackspaceIdentity {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RackspaceIdentity {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| SlurpError::ConfigInvalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: RACKSPACE_IDENTITY_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IdentityClient for RackspaceIdentity {
    async fn authenticate(&self, username: &str, api_key: &str) -> Result<AuthToken> {
        tracing::debug!(username = %username, endpoint = %self.endpoint, "Authenticating");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AuthRequest::api_key(username, api_key))
            .send()
            .await
            .map_err(|e| SlurpError::AuthenticationFailed(format!("request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(SlurpError::AuthenticationFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let identity: IdentityResponse = response.json().await.map_err(|e| {
            SlurpError::AuthenticationFailed(format!("failed to parse identity response: {}", e))
        })?;

        if identity.access.token.id.is_empty() {
            return Err(SlurpError::AuthenticationFailed(
                "identity response carried an empty token".to_string(),
            ));
        }
        if let Some(expires) = &identity.access.token.expires {
            tracing::debug!(expires = %expires, "Token issued");
        }

        Ok(AuthToken::new(identity.access.token.id))
    }
}
