use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Node id every exported conversation tree hangs from.
pub const ROOT_NODE_ID: &str = "client-created-root";

/// Conversation key -> raw conversation record, in source order.
pub type ExportBundle = Map<String, Value>;

/// One node of a conversation tree
///
/// Only a node that is not an object at all fails to deserialize. Fields of the wrong type
/// read as absent, so an odd node is skipped by the walk instead of failing the conversation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageNode {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub message: Option<Message>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub children: Vec<Value>,
}

impl MessageNode {
    /// The traversal only ever follows the first child; sibling branches are ignored.
    ///
    /// A first child that is null, empty or not a string ends the chain.
    pub fn first_child(&self) -> Option<&str> {
        self.children.first().and_then(Value::as_str).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub content: Option<Content>,
}

impl Message {
    /// Author role, if it is a non-empty string
    pub fn role(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|a| a.role.as_ref())
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
    }

    /// Text parts joined with newlines. Non-string parts are skipped.
    pub fn text(&self) -> String {
        let Some(content) = &self.content else {
            return String::new();
        };
        let parts: Vec<&str> = content.parts.iter().filter_map(Value::as_str).collect();
        parts.join("\n")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub role: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient")]
    pub parts: Vec<Value>,
}

/// Identity and timing fields of a conversation record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    pub create_time: Option<DateTime<Utc>>,
}

impl ConversationMeta {
    /// Reads the metadata fields of a record, tolerating any shape.
    pub fn of(record: &Value) -> Self {
        Self::deserialize(record).unwrap_or_default()
    }
}
