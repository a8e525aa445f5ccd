use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ImportError, Result};
use crate::linearizer::alternation::enforce_alternation;
use crate::models::{MessageNode, ROOT_NODE_ID, Role, Turn};

/// Linearize one conversation record into alternating user/assistant turns
///
/// Every returned turn carries `conversation_id`.
///
/// # Errors
///
/// - [`ImportError::MalformedRecord`] if the record has no `mapping` object or a node
///   cannot be read
/// - [`ImportError::MissingRoot`] if the mapping lacks the `client-created-root` node
/// - [`ImportError::MissingNode`] if a child id points outside the mapping
/// - [`ImportError::CyclicChain`] if following first children never terminates
///
/// # Examples
///
/// ```
/// use chat_import::linearizer::linearize;
/// use chat_import::models::Role;
/// use serde_json::json;
///
/// let record = json!({"mapping": {
///     "client-created-root": {"children": ["a"]},
///     "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["hi"]}}, "children": ["b"]},
///     "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["hello"]}}, "children": []}
/// }});
/// let turns = linearize(&record, 1)?;
/// assert_eq!(turns.len(), 2);
/// assert_eq!(turns[0].role, Role::User);
/// # Ok::<(), chat_import::ImportError>(())
/// ```
pub fn linearize(record: &Value, conversation_id: u64) -> Result<Vec<Turn>> {
    let raw = walk_spine(record, conversation_id)?;
    Ok(enforce_alternation(raw))
}

/// Walk the first-child spine from the root and collect raw user/assistant turns
///
/// No alternation is applied here; blank and non-conversational messages are skipped.
pub fn walk_spine(record: &Value, conversation_id: u64) -> Result<Vec<Turn>> {
    let mapping = mapping_of(record)?;

    let root = node_at(mapping, ROOT_NODE_ID)
        .ok_or_else(|| ImportError::MissingRoot(ROOT_NODE_ID.to_string()))??;

    let mut raw = Vec::new();
    let mut current = root.first_child().map(str::to_string);
    let mut steps = 0usize;

    while let Some(id) = current {
        steps += 1;
        if steps > mapping.len() {
            return Err(ImportError::CyclicChain(steps - 1));
        }

        let node = node_at(mapping, &id).ok_or_else(|| ImportError::MissingNode(id.clone()))??;

        if let Some(turn) = turn_from_node(&node, conversation_id) {
            raw.push(turn);
        }

        current = node.first_child().map(str::to_string);
    }

    tracing::debug!(steps, turns = raw.len(), "walked conversation spine");
    Ok(raw)
}

fn mapping_of(record: &Value) -> Result<&Map<String, Value>> {
    match record.get("mapping") {
        Some(Value::Object(mapping)) => Ok(mapping),
        Some(_) => Err(ImportError::MalformedRecord("'mapping' is not an object".to_string())),
        None => Err(ImportError::MalformedRecord("record has no 'mapping'".to_string())),
    }
}

/// `None` when the id is absent; `Some(Err)` when the node exists but has the wrong shape.
fn node_at(mapping: &Map<String, Value>, id: &str) -> Option<Result<MessageNode>> {
    mapping.get(id).map(|value| {
        MessageNode::deserialize(value)
            .map_err(|e| ImportError::MalformedRecord(format!("node '{}': {}", id, e)))
    })
}

fn turn_from_node(node: &MessageNode, conversation_id: u64) -> Option<Turn> {
    let message = node.message.as_ref()?;
    let role = Role::from_author(message.role()?)?;
    let text = message.text();
    if text.trim().is_empty() {
        return None;
    }
    Some(Turn { role, text, conversation_id })
}
