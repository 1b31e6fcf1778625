use stackslurp_types::{Event, RawQuestion};

/// Producer identity announced on every event
pub fn reporter_tag() -> String {
    format!("stackslurp v{}", env!("CARGO_PKG_VERSION"))
}

/// Convert a search result into the canonical event.
///
/// Pure: the same question always yields the same event. The complete
/// question travels along in `extra`.
pub fn to_event(raw: &RawQuestion, reporter: &str) -> Event {
    Event::new(raw.link.clone(), reporter)
        .with_tags(raw.tags.clone().unwrap_or_default())
        .with_incident_date(raw.creation_date)
        .with_origin_id(raw.question_id)
        .with_title(raw.title.clone())
        .with_extra(raw.to_value())
}

#[derive(Debug, Clone)]
pub struct EventMapper {
    reporter: String,
}

impl EventMapper {
    pub fn new(reporter: impl Into<String>) -> Self {
        Self {
            reporter: reporter.into(),
        }
    }

    pub fn reporter(&self) -> &str {
        &self.reporter
    }

    pub fn to_event(&self, raw: &RawQuestion) -> Event {
        let event = to_event(raw, &self.reporter);
        tracing::debug!(url = %event.url, origin_id = raw.question_id, "Event");
        event
    }

    pub fn map_all(&self, questions: &[RawQuestion]) -> Vec<Event> {
        questions.iter().map(|q| self.to_event(q)).collect()
    }
}

impl Default for EventMapper {
    fn default() -> Self {
        Self::new(reporter_tag())
    }
}
