use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Format marker attached to every sensorbox topic.
pub const FORMAT_JSON: &str = "application/json";

/// Topic info block. Keys other than `format` belong to the registry and
/// are preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TopicInfo {
    pub fn json() -> Self {
        Self {
            format: Some(FORMAT_JSON.to_owned()),
            other: Map::new(),
        }
    }
}

/// A telemetry topic as stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Topic {
    pub path: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<TopicInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors_can_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

/// A topic to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTopic {
    pub path: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub info: TopicInfo,
    pub contributors_can_read: bool,
    pub schema_id: String,
}

/// Fields sent when refreshing an existing topic. The schema is never
/// part of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicUpdate {
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub info: Option<TopicInfo>,
}
