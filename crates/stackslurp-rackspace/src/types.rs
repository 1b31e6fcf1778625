use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"auth": {"RAX-KSKEY:apiKeyCredentials": {...}}}`
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub auth: AuthCredentials<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthCredentials<'a> {
    #[serde(rename = "RAX-KSKEY:apiKeyCredentials")]
    pub api_key_credentials: ApiKeyCredentials<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyCredentials<'a> {
    pub username: &'a str,
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}

impl<'a> AuthRequest<'a> {
    pub fn api_key(username: &'a str, api_key: &'a str) -> Self {
        Self {
            auth: AuthCredentials {
                api_key_credentials: ApiKeyCredentials { username, api_key },
            },
        }
    }
}

/// The part of the identity response we read: `access.token.id`
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityResponse {
    pub access: Access,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Access {
    pub token: TokenInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    pub id: String,
    #[serde(default)]
    pub expires: Option<String>,
}

/// One queued message: `{"ttl": 300, "body": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct QueueMessage<'a> {
    pub ttl: u32,
    pub body: &'a Value,
}
