//! Import orchestration for conversation exports
//!
//! # Error Handling Strategy
//!
//! The orchestrator follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Missing input**: no export folder, or a folder without `conversations.json`, is
//!   reported on the console and ends the run with an empty report (exit status 0).
//!
//! - **Record-level failures**: a conversation that cannot be linearized (missing root,
//!   dangling child, looping chain) is logged, recorded in the [`ImportReport`], and skipped.
//!   The remaining conversations are still processed.
//!
//! - **I/O failures**: unreadable or unparsable files, or a console that cannot be written
//!   to, abort the run via `anyhow::Result` with context.

pub mod discovery;
pub mod orchestrator;
pub mod sink;

pub use discovery::{DEFAULT_INPUT_DIR, discover_export_dir, resolve_export_dir};
pub use orchestrator::{ExportStats, ImportConfig, ImportReport, Importer, RecordFailure};
pub use sink::{ConsoleSink, JsonLinesSink, OutputFormat, TurnSink};
