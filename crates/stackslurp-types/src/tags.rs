use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_DELIMITER: &str = ";";

/// Value of the search `tagged` parameter
///
/// Built either from a list of tags (joined with `;`) or from a string that
/// is already in wire form, which is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TagSpec", into = "String")]
pub struct TagFilter(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum TagSpec {
    Joined(String),
    List(Vec<String>),
}

impl From<TagSpec> for TagFilter {
    fn from(value: TagSpec) -> Self {
        match value {
            TagSpec::Joined(tags) => TagFilter::from(tags),
            TagSpec::List(tags) => TagFilter::from(tags),
        }
    }
}

impl From<TagFilter> for String {
    fn from(filter: TagFilter) -> Self {
        filter.0
    }
}

impl TagFilter {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.tags().next().is_none()
    }

    /// Individual tags, in order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.split(TAG_DELIMITER).filter(|t| !t.is_empty())
    }
}

impl From<Vec<String>> for TagFilter {
    fn from(tags: Vec<String>) -> Self {
        Self(tags.join(TAG_DELIMITER))
    }
}

impl From<&[&str]> for TagFilter {
    fn from(tags: &[&str]) -> Self {
        Self(tags.join(TAG_DELIMITER))
    }
}

impl From<String> for TagFilter {
    fn from(tags: String) -> Self {
        Self(tags)
    }
}

impl From<&str> for TagFilter {
    fn from(tags: &str) -> Self {
        Self(tags.to_string())
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
