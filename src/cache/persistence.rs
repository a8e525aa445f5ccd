//! Cache persistence: load/save with atomic writes

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::ExportBundle;
use crate::utils::validate_file_size;

/// Where the seen-chat cache lives unless configured otherwise
pub const DEFAULT_CACHE_PATH: &str = ".cache/seen_chats.json";

/// Load the seen-chat cache
///
/// A missing file is an empty cache. The parsed document is returned as-is; callers
/// ([`seen_keys`](crate::cache::seen_keys)) ignore anything that is not an object.
pub fn load_seen_cache(path: &Path) -> Result<Value> {
    if !path.is_file() {
        tracing::info!(path = %path.display(), "no seen-chat cache yet");
        return Ok(Value::Object(ExportBundle::new()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open cache file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let cache: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse cache JSON: {}", path.display()))?;

    if !cache.is_object() {
        tracing::warn!(path = %path.display(), "seen-chat cache is not a JSON object; ignoring it");
    }
    Ok(cache)
}

/// Merge newly processed conversations into what the cache already held
///
/// Existing entries are kept unless a new entry uses the same key.
pub fn merge_into_cache(seen_cache: Value, work_set: &ExportBundle) -> ExportBundle {
    let mut merged = match seen_cache {
        Value::Object(entries) => entries,
        _ => ExportBundle::new(),
    };
    for (key, record) in work_set {
        merged.insert(key.clone(), record.clone());
    }
    merged
}

/// Write the cache atomically (temp file + rename), creating parent directories
pub fn save_seen_cache(path: &Path, entries: &ExportBundle) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create cache directory: {}", parent.display())
        })?;
    }

    let temp_path = temp_path_for(path);
    let json = serde_json::to_string_pretty(entries).context("Failed to serialize cache")?;
    fs::write(&temp_path, json).context("Failed to write cache temp file")?;
    fs::rename(&temp_path, path).context("Failed to rename cache temp file")?;

    tracing::info!(path = %path.display(), entries = entries.len(), "saved seen-chat cache");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::cache::diff::{diff, seen_keys};

    fn bundle(value: Value) -> ExportBundle {
        match value {
            Value::Object(map) => map,
            _ => panic!("bundle fixture must be an object"),
        }
    }

    #[test]
    fn test_missing_cache_is_empty_object() {
        let dir = TempDir::new().unwrap();
        let cache = load_seen_cache(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cache, json!({}));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_round_trips_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cache").join("seen_chats.json");
        let work = bundle(json!({
            "a": {"id": "a", "title": "Café ☕", "mapping": {}},
            "1700000000.5": {"create_time": 1700000000.5, "mapping": {}},
        }));

        save_seen_cache(&path, &work).unwrap();
        let loaded = load_seen_cache(&path).unwrap();

        let loaded_keys: Vec<&str> =
            loaded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(loaded_keys, vec!["a", "1700000000.5"]);
        assert_eq!(loaded["a"]["title"], "Café ☕");
        assert!(!dir.path().join(".cache").join("seen_chats.json.tmp").exists());
    }

    #[test]
    fn test_saved_file_keeps_non_ascii_and_indents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");
        save_seen_cache(&path, &bundle(json!({"k": {"title": "日本語"}}))).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("日本語"));
        assert!(raw.contains("\n  \"k\""));
    }

    #[test]
    fn test_rerun_after_save_finds_nothing_new() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");
        let all = bundle(json!({"0": {"id": "a"}, "1": {"id": "b"}}));

        let first = diff(&all, &load_seen_cache(&path).unwrap());
        let merged = merge_into_cache(load_seen_cache(&path).unwrap(), &first);
        save_seen_cache(&path, &merged).unwrap();

        assert!(diff(&all, &load_seen_cache(&path).unwrap()).is_empty());
    }

    #[test]
    fn test_merge_keeps_existing_entries() {
        let merged = merge_into_cache(
            json!({"old": {"id": "old"}}),
            &bundle(json!({"new": {"id": "new"}})),
        );
        assert!(merged.contains_key("old"));
        assert!(merged.contains_key("new"));
        assert_eq!(seen_keys(&Value::Object(merged)).len(), 2);
    }

    #[test]
    fn test_merge_over_non_object_cache() {
        let merged = merge_into_cache(json!([1, 2]), &bundle(json!({"new": {"id": "new"}})));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_malformed_cache_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, "{broken").unwrap();
        let err = load_seen_cache(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse cache JSON"));
    }
}
