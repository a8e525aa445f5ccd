use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::ImportError;
use crate::models::ExportBundle;
use crate::utils::validate_file_size;

/// Name of the conversation dump inside an export folder
pub const CONVERSATIONS_FILENAME: &str = "conversations.json";

/// Load the export bundle from `<export_dir>/conversations.json`
///
/// Returns [`ImportError::MissingInput`] (wrapped in `anyhow`) when the folder has no
/// conversations file, so callers can treat it as an empty, non-fatal result.
pub fn load_export_bundle(export_dir: &Path) -> Result<ExportBundle> {
    let path = export_dir.join(CONVERSATIONS_FILENAME);
    if !path.is_file() {
        return Err(ImportError::MissingInput(export_dir.to_path_buf()).into());
    }
    parse_export_file(&path)
}

/// Parse a conversations file into an ordered bundle
///
/// A top-level object is used as-is. A top-level array (the usual export layout) is keyed
/// by position: `"0"`, `"1"`, ...
pub fn parse_export_file(path: &Path) -> Result<ExportBundle> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse export JSON: {}", path.display()))?;

    let bundle = match value {
        Value::Object(map) => map,
        Value::Array(records) => records
            .into_iter()
            .enumerate()
            .map(|(index, record)| (index.to_string(), record))
            .collect(),
        _ => return Err(ImportError::InvalidExport(path.to_path_buf()).into()),
    };

    tracing::info!(path = %path.display(), conversations = bundle.len(), "loaded export bundle");
    Ok(bundle)
}
