//! JSON loaders for ChatGPT-style data exports
//!
//! # Error Handling Strategy
//!
//! Loading is all-or-nothing per file: `conversations.json` is a single JSON document, so a
//! syntax error anywhere makes the whole file unusable and is returned with context.
//!
//! - **Missing export file**: surfaced as [`ImportError::MissingInput`](crate::ImportError)
//!   so the orchestrator can report it and finish the run with an empty result.
//! - **Oversized files**: rejected on the open handle before reading.
//! - **Record-level problems** (missing root, dangling children) are not detected here; they
//!   surface later from the linearizer, one record at a time.

pub mod deserializers;
pub mod export;

pub use export::{CONVERSATIONS_FILENAME, load_export_bundle, parse_export_file};
