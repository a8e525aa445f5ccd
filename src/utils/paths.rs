use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ImportError;

// Maximum size for export and cache files: 512MB
const MAX_FILE_SIZE_BYTES: u64 = 512 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits (512MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and the read that follows.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 512MB ([`ImportError::FileTooLarge`])
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let size = metadata.len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ImportError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_FILE_SIZE_BYTES,
        }
        .into());
    }

    Ok(())
}

/// Expands a leading `~` in an operator-supplied path to the home directory
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use chat_import::expand_tilde;
///
/// assert_eq!(expand_tilde("/data/export"), PathBuf::from("/data/export"));
/// ```
pub fn expand_tilde(raw: &str) -> PathBuf {
    expand_tilde_internal(raw, dirs::home_dir())
}

pub(crate) fn expand_tilde_internal(raw: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };

    if raw == "~" {
        return home;
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use chat_import::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Downloads/export");
/// // Returns "~/Downloads/export" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty() && *h != "/");

    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
