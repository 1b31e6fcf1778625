use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound the queue service accepts for a message TTL, in seconds
pub const MIN_MESSAGE_TTL: u32 = 60;

/// Upper bound (14 days) the queue service accepts for a message TTL, in seconds
pub const MAX_MESSAGE_TTL: u32 = 1_209_600;

/// Short-lived bearer credential returned by the identity service
///
/// Expiry is not tracked; callers authenticate again before every send cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Body returned by the queue after a successful post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueReceipt {
    #[serde(default)]
    pub partial: bool,
    /// Paths of the created messages
    #[serde(default)]
    pub resources: Vec<String>,
}
