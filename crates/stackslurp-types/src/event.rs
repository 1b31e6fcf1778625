use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of the record in the system it was pulled from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for OriginId {
    fn from(value: u64) -> Self {
        OriginId::Numeric(value)
    }
}

impl From<String> for OriginId {
    fn from(value: String) -> Self {
        OriginId::Text(value)
    }
}

impl From<&str> for OriginId {
    fn from(value: &str) -> Self {
        OriginId::Text(value.to_string())
    }
}

/// Canonical incident record sent downstream
///
/// `url` uniquely identifies the incident: resending an event with the same
/// URL updates the incident instead of creating a duplicate. `tags`, when
/// present, replace any tags the incident already carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub url: String,

    /// Producer identity, e.g. "stackslurp v0.1.0"
    pub reporter: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Effective date of the incident, seconds since the epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<OriginId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Login of someone already working the incident (required if `assigned_at` is set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,

    /// Free-form metadata, here the full source record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl Event {
    pub fn new(url: impl Into<String>, reporter: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reporter: reporter.into(),
            tags: None,
            incident_date: None,
            origin_id: None,
            title: None,
            assignee: None,
            assigned_at: None,
            completed_at: None,
            extra: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_incident_date(mut self, epoch_seconds: i64) -> Self {
        self.incident_date = Some(epoch_seconds);
        self
    }

    pub fn with_origin_id(mut self, origin_id: impl Into<OriginId>) -> Self {
        self.origin_id = Some(origin_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Mark the incident as being worked, starting at `at`
    pub fn assigned(mut self, assignee: impl Into<String>, at: i64) -> Self {
        self.assignee = Some(assignee.into());
        self.assigned_at = Some(at);
        self
    }

    pub fn completed(mut self, at: i64) -> Self {
        self.completed_at = Some(at);
        self
    }
}
