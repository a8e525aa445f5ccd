use serde_json::Value;

const ID_FIELD: &str = "id";
const CREATE_TIME_FIELD: &str = "create_time";
const NONE_KEY: &str = "None";

/// Stable identity string for a conversation record
///
/// Objects use their `id` when it is truthy, else their `create_time`, else `"None"`.
/// Anything that is not an object is keyed by its own string form. Never fails.
///
/// # Examples
///
/// ```
/// use chat_import::derive_key;
/// use serde_json::json;
///
/// assert_eq!(derive_key(&json!({"id": "abc", "create_time": 1.5})), "abc");
/// assert_eq!(derive_key(&json!({"id": "", "create_time": 1.5})), "1.5");
/// assert_eq!(derive_key(&json!({})), "None");
/// ```
pub fn derive_key(record: &Value) -> String {
    let Value::Object(fields) = record else {
        return value_to_key(record);
    };

    if let Some(id) = fields.get(ID_FIELD).filter(|v| is_truthy(v)) {
        return value_to_key(id);
    }

    match fields.get(CREATE_TIME_FIELD) {
        Some(create_time) => value_to_key(create_time),
        None => NONE_KEY.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn value_to_key(value: &Value) -> String {
    match value {
        Value::Null => NONE_KEY.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
