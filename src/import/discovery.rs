use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::error::ImportError;
use crate::parsers::CONVERSATIONS_FILENAME;
use crate::utils::{expand_tilde, format_path_with_tilde};

/// Folder scanned for export subfolders when none is given
pub const DEFAULT_INPUT_DIR: &str = "input";

const PROMPT: &str = "Please enter the location of your ChatGPT export folder:\n>";

/// Decide which export folder to import from
///
/// Resolution order:
/// 1. `explicit`, when given
/// 2. if `input_dir` is missing or empty, ask the operator on `console` and read one line
///    from `input`; a non-empty answer wins
/// 3. the first subfolder of `input_dir` (by name) holding `conversations.json`, else its
///    first subfolder
///
/// # Errors
///
/// Returns [`ImportError::EmptyInputDirectory`] when nothing could be resolved, or an I/O
/// error if the console cannot be used.
pub fn resolve_export_dir(
    explicit: Option<&Path>,
    input_dir: &Path,
    input: &mut dyn BufRead,
    console: &mut dyn Write,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        writeln!(console, "Importing from {}...", format_path_with_tilde(dir))?;
        return Ok(dir.to_path_buf());
    }

    if !has_entries(input_dir) {
        write!(console, "{}", PROMPT)?;
        console.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer).context("Failed to read export folder from console")?;
        let answer = answer.trim();
        if !answer.is_empty() {
            let dir = expand_tilde(answer);
            writeln!(console, "Importing from {}...", format_path_with_tilde(&dir))?;
            return Ok(dir);
        }
    }

    match discover_export_dir(input_dir) {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "auto-selected export folder");
            Ok(dir)
        }
        None => Err(ImportError::EmptyInputDirectory(input_dir.to_path_buf()).into()),
    }
}

/// Pick an export folder among the immediate subfolders of `input_dir`
///
/// Subfolders are visited in name order. The first one containing `conversations.json` is
/// preferred; otherwise the first subfolder is returned. `None` when there are no
/// subfolders or `input_dir` does not exist.
pub fn discover_export_dir(input_dir: &Path) -> Option<PathBuf> {
    if !input_dir.is_dir() {
        return None;
    }

    let subfolders: Vec<PathBuf> = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();

    subfolders
        .iter()
        .find(|dir| dir.join(CONVERSATIONS_FILENAME).is_file())
        .or_else(|| subfolders.first())
        .cloned()
}

fn has_entries(dir: &Path) -> bool {
    std::fs::read_dir(dir).map(|mut entries| entries.next().is_some()).unwrap_or(false)
}
