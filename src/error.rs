use std::path::PathBuf;

/// Domain failures raised while importing an export.
///
/// Application-level plumbing still uses `anyhow::Result`; these variants are the ones
/// callers may want to match on (per-record isolation, graceful early returns).
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("No conversations.json found in {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Could not find root message '{0}'")]
    MissingRoot(String),

    #[error("No folders found inside the input directory: {}", .0.display())]
    EmptyInputDirectory(PathBuf),

    #[error("malformed conversation record: {0}")]
    MalformedRecord(String),

    #[error("message node '{0}' is referenced but not present in the mapping")]
    MissingNode(String),

    #[error("message chain does not terminate after {0} steps")]
    CyclicChain(usize),

    #[error("unsupported export layout in {}: expected a JSON object or array", .0.display())]
    InvalidExport(PathBuf),

    #[error("File too large: {} ({size} bytes, max {max} bytes)", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, ImportError>;
