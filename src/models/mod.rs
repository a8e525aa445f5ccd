//! Data models for conversation exports.
//!
//! - [`ExportBundle`] - Ordered mapping of conversation key to raw conversation record
//! - [`MessageNode`] - Typed view of one node in a conversation's message tree
//! - [`ConversationMeta`] - Identity and timing fields of a conversation record
//! - [`Turn`] - One linearized, role-tagged unit of conversation text
//!
//! Conversation records stay as raw `serde_json::Value` so they can be written back to the
//! seen-chat cache unchanged. The typed views here are deserialized straight from borrowed
//! values when a component needs them.

pub mod record;
pub mod turn;

pub use record::{
    Author, Content, ConversationMeta, ExportBundle, Message, MessageNode, ROOT_NODE_ID,
};
pub use turn::{DEFAULT_CONVERSATION_ID, Role, Turn};
