use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest creation time (epoch seconds) to request on the next fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watermark(i64);

impl Watermark {
    pub fn new(epoch_seconds: i64) -> Self {
        Self(epoch_seconds)
    }

    /// Starting point used when none is configured: 24 hours before `now`
    pub fn day_before(now: DateTime<Utc>) -> Self {
        Self((now - Duration::days(1)).timestamp())
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    /// Watermark that follows the newest seen creation date.
    ///
    /// The search query is inclusive of `since`, so the next window starts one
    /// second after the newest item. Never moves backwards.
    pub fn advanced_past(self, newest_creation_date: i64) -> Self {
        Self(self.0.max(newest_creation_date.saturating_add(1)))
    }
}

impl From<i64> for Watermark {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
