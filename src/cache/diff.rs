use std::collections::HashSet;

use serde_json::Value;

use crate::cache::key::derive_key;
use crate::models::ExportBundle;

/// Derived keys of every record in the seen cache
///
/// A cache whose top level is not an object contributes no keys.
pub fn seen_keys(seen_cache: &Value) -> HashSet<String> {
    match seen_cache {
        Value::Object(entries) => entries.values().map(derive_key).collect(),
        _ => HashSet::new(),
    }
}

/// Records of `all_conversations` whose derived key is not in the cache, keyed by that key
///
/// Bundle order is kept. Records that share a derived key collapse into one entry, the
/// last one winning.
pub fn diff(all_conversations: &ExportBundle, seen_cache: &Value) -> ExportBundle {
    let seen = seen_keys(seen_cache);

    let mut unseen = ExportBundle::new();
    for record in all_conversations.values() {
        let key = derive_key(record);
        if !seen.contains(&key) {
            unseen.insert(key, record.clone());
        }
    }

    tracing::info!(
        total = all_conversations.len(),
        seen = seen.len(),
        new = unseen.len(),
        "computed unseen conversations"
    );
    unseen
}
