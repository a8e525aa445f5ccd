//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

pub const ROOT: &str = "client-created-root";

/// Builder for a working directory holding `input/<export>/conversations.json`
pub struct WorkspaceBuilder {
    temp_dir: TempDir,
}

impl WorkspaceBuilder {
    /// Create an empty workspace (no input folder yet)
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add an export folder under `input/` with the given conversations (array layout)
    pub fn with_export(self, name: &str, conversations: &[ConversationBuilder]) -> Self {
        let records: Vec<Value> = conversations.iter().map(ConversationBuilder::build).collect();
        self.with_export_raw(name, &Value::Array(records).to_string())
    }

    /// Add an export folder whose conversations.json holds `content` verbatim
    pub fn with_export_raw(self, name: &str, content: &str) -> Self {
        let export_dir = self.temp_dir.path().join("input").join(name);
        fs::create_dir_all(&export_dir).expect("Failed to create export dir");
        fs::write(export_dir.join("conversations.json"), content)
            .expect("Failed to write conversations.json");
        self
    }

    /// Add an empty folder under `input/`
    pub fn with_empty_folder(self, name: &str) -> Self {
        fs::create_dir_all(self.temp_dir.path().join("input").join(name))
            .expect("Failed to create folder");
        self
    }

    /// Pre-populate the seen-chat cache
    pub fn with_cache(self, cache: &Value) -> Self {
        let path = self.cache_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create cache dir");
        fs::write(&path, cache.to_string()).expect("Failed to write cache");
        self
    }

    pub fn input_dir(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.temp_dir.path().join(".cache").join("seen_chats.json")
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one conversation record with a linear message chain
pub struct ConversationBuilder {
    id: Option<String>,
    title: String,
    create_time: Option<f64>,
    messages: Vec<(String, Vec<String>)>,
    include_root: bool,
}

impl ConversationBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: format!("Conversation {}", id),
            create_time: Some(1_700_000_000.0),
            messages: Vec::new(),
            include_root: true,
        }
    }

    /// A record without an `id`, identified by its creation time only
    pub fn without_id(create_time: f64) -> Self {
        Self { id: None, create_time: Some(create_time), ..Self::new("unused") }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn create_time(mut self, create_time: f64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    pub fn user(self, text: &str) -> Self {
        self.message("user", &[text])
    }

    pub fn assistant(self, text: &str) -> Self {
        self.message("assistant", &[text])
    }

    pub fn system(self, text: &str) -> Self {
        self.message("system", &[text])
    }

    /// Append a message with several content parts
    pub fn message(mut self, role: &str, parts: &[&str]) -> Self {
        self.messages.push((role.to_string(), parts.iter().map(|p| p.to_string()).collect()));
        self
    }

    /// Drop the `client-created-root` node from the mapping
    pub fn without_root(mut self) -> Self {
        self.include_root = false;
        self
    }

    pub fn build(&self) -> Value {
        let mut mapping = Map::new();
        let ids: Vec<String> = (0..self.messages.len()).map(|i| format!("node-{}", i)).collect();

        if self.include_root {
            let children: Vec<&String> = ids.first().into_iter().collect();
            mapping.insert(ROOT.to_string(), json!({"id": ROOT, "message": null, "children": children}));
        }

        for (i, (role, parts)) in self.messages.iter().enumerate() {
            let children: Vec<&String> = ids.get(i + 1).into_iter().collect();
            mapping.insert(
                ids[i].clone(),
                json!({
                    "id": ids[i],
                    "message": {
                        "author": {"role": role},
                        "content": {"content_type": "text", "parts": parts}
                    },
                    "children": children,
                }),
            );
        }

        let mut record = json!({
            "title": self.title,
            "create_time": self.create_time,
            "mapping": mapping,
        });
        if let Some(id) = &self.id {
            record["id"] = json!(id);
        }
        record
    }
}

/// A short, well-formed exchange
pub fn simple_conversation(id: &str) -> ConversationBuilder {
    ConversationBuilder::new(id).user("hi").assistant("hello")
}
