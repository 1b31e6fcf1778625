use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Question record as delivered by the search API
///
/// Only the fields the event mapping needs are typed. Every other
/// provider-specific field (owner, score, view_count, ...) is kept verbatim
/// in `extra` so the full record can travel downstream for provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub creation_date: i64,
    pub question_id: u64,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawQuestion {
    pub fn new(
        question_id: u64,
        link: impl Into<String>,
        title: impl Into<String>,
        creation_date: i64,
    ) -> Self {
        Self {
            link: link.into(),
            tags: None,
            creation_date,
            question_id,
            title: title.into(),
            extra: Map::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The whole record, typed fields and passthrough fields, as one JSON object
    pub fn to_value(&self) -> Value {
        let mut obj = self.extra.clone();
        obj.insert("link".to_string(), Value::from(self.link.clone()));
        if let Some(tags) = &self.tags {
            obj.insert("tags".to_string(), Value::from(tags.clone()));
        }
        obj.insert("creation_date".to_string(), Value::from(self.creation_date));
        obj.insert("question_id".to_string(), Value::from(self.question_id));
        obj.insert("title".to_string(), Value::from(self.title.clone()));
        Value::Object(obj)
    }
}
