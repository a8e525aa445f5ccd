//! Chat Import - Linearize ChatGPT data exports into alternating turns
//!
//! This library reads the `conversations.json` file of a ChatGPT data export and turns each
//! conversation's message tree into a flat list of user/assistant turns. It supports:
//!
//! - Loading exports shaped as a JSON object or array of conversation records
//! - Walking each conversation's first-child spine from the `client-created-root` node
//! - Enforcing strict user → assistant alternation
//! - Skipping conversations already recorded in a seen-chat cache
//! - Streaming turns to an interactive console or as JSON lines
//!
//! # Example
//!
//! ```no_run
//! use chat_import::{derive_key, linearize, load_export_bundle};
//! use std::path::Path;
//!
//! let bundle = load_export_bundle(Path::new("input/my-export"))?;
//! for record in bundle.values() {
//!     let turns = linearize(record, 1)?;
//!     println!("{}: {} turns", derive_key(record), turns.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cache;
pub mod cli;
pub mod error;
pub mod import;
pub mod linearizer;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use cache::{derive_key, diff};
pub use error::ImportError;
pub use import::{ImportConfig, ImportReport, Importer};
pub use linearizer::linearize;
pub use models::{ExportBundle, Role, Turn};
pub use parsers::load_export_bundle;
pub use utils::{expand_tilde, format_path_with_tilde};
