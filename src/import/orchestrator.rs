use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{self, DEFAULT_CACHE_PATH};
use crate::error::ImportError;
use crate::import::discovery::{DEFAULT_INPUT_DIR, resolve_export_dir};
use crate::import::sink::{ConsoleSink, JsonLinesSink, OutputFormat, TurnSink};
use crate::linearizer::linearize;
use crate::models::{ConversationMeta, DEFAULT_CONVERSATION_ID, ExportBundle};
use crate::parsers::load_export_bundle;

/// Settings for one import run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Export folder to use instead of prompting or scanning `input_dir`
    pub export_dir: Option<PathBuf>,
    pub input_dir: PathBuf,
    pub cache_path: PathBuf,
    /// Write processed conversations back into the seen-chat cache
    pub save_cache: bool,
    /// Wait for a line of input after each console turn
    pub pause: bool,
    pub format: OutputFormat,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            save_cache: false,
            pause: true,
            format: OutputFormat::Console,
        }
    }
}

/// A conversation that could not be linearized
#[derive(Debug)]
pub struct RecordFailure {
    pub key: String,
    pub error: ImportError,
}

/// What an import run did
#[derive(Debug, Default)]
pub struct ImportReport {
    pub export_dir: Option<PathBuf>,
    pub total_conversations: usize,
    pub new_conversations: usize,
    pub processed: usize,
    pub turns_emitted: usize,
    pub failures: Vec<RecordFailure>,
    pub cache_saved: bool,
}

/// Counts for the `stats` command
#[derive(Debug, Default)]
pub struct ExportStats {
    pub export_dir: PathBuf,
    pub total_conversations: usize,
    pub seen_conversations: usize,
    pub new_conversations: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

/// Drives a run: resolve the export, skip conversations already cached, linearize the rest
/// and stream their turns
///
/// Console interaction goes through the readers and writers handed to each call, so a run
/// can be driven from tests without a terminal:
///
/// - `input`: operator answers (export folder prompt, acknowledgments between turns)
/// - `output`: turn stream (console lines or JSONL)
/// - `status`: prompts and status lines
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn run(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        status: &mut dyn Write,
    ) -> Result<ImportReport> {
        let mut report = ImportReport::default();

        let Some((export_dir, bundle)) = self.load_export(input, status)? else {
            return Ok(report);
        };
        report.export_dir = Some(export_dir);
        report.total_conversations = bundle.len();

        let seen_cache = cache::load_seen_cache(&self.config.cache_path)?;
        let work_set = cache::diff(&bundle, &seen_cache);
        report.new_conversations = work_set.len();

        if work_set.is_empty() {
            writeln!(status, "All chats already present in cache.")?;
            return Ok(report);
        }
        writeln!(status, "Found {} new chat(s) not present in cache.", work_set.len())?;

        {
            let mut sink: Box<dyn TurnSink + '_> = match self.config.format {
                OutputFormat::Console => {
                    Box::new(ConsoleSink::new(input, output, self.config.pause))
                }
                OutputFormat::Jsonl => Box::new(JsonLinesSink::new(output)),
            };
            self.stream_work_set(&work_set, sink.as_mut(), &mut report)?;
        }

        if !report.failures.is_empty() {
            writeln!(
                status,
                "{} of {} chat(s) could not be read:",
                report.failures.len(),
                work_set.len()
            )?;
            for failure in &report.failures {
                writeln!(status, "  {}: {}", failure.key, failure.error)?;
            }
        }

        if self.config.save_cache {
            // failed records stay unseen so a later run retries them
            let processed: ExportBundle = work_set
                .iter()
                .filter(|(key, _)| !report.failures.iter().any(|f| &f.key == *key))
                .map(|(key, record)| (key.clone(), record.clone()))
                .collect();
            let merged = cache::merge_into_cache(seen_cache, &processed);
            cache::save_seen_cache(&self.config.cache_path, &merged)?;
            report.cache_saved = true;
        }

        Ok(report)
    }

    /// Summarize the export against the seen-chat cache without emitting any turns
    ///
    /// `total` and `seen` count export records; `new` counts distinct chat keys, the same
    /// number an import run reports. `None` when there was nothing to import.
    pub fn stats(
        &self,
        input: &mut dyn BufRead,
        status: &mut dyn Write,
    ) -> Result<Option<ExportStats>> {
        let Some((export_dir, bundle)) = self.load_export(input, status)? else {
            return Ok(None);
        };

        let seen_cache = cache::load_seen_cache(&self.config.cache_path)?;
        let seen = cache::seen_keys(&seen_cache);
        let seen_conversations =
            bundle.values().filter(|record| seen.contains(&cache::derive_key(record))).count();

        let created: Vec<DateTime<Utc>> =
            bundle.values().filter_map(|record| ConversationMeta::of(record).create_time).collect();

        Ok(Some(ExportStats {
            export_dir,
            total_conversations: bundle.len(),
            seen_conversations,
            new_conversations: cache::diff(&bundle, &seen_cache).len(),
            oldest: created.iter().min().copied(),
            newest: created.iter().max().copied(),
        }))
    }

    /// Resolve the export folder and load its bundle
    ///
    /// `None` means the run should end quietly: nothing to import, already reported.
    fn load_export(
        &self,
        input: &mut dyn BufRead,
        status: &mut dyn Write,
    ) -> Result<Option<(PathBuf, ExportBundle)>> {
        let export_dir = match resolve_export_dir(
            self.config.export_dir.as_deref(),
            &self.config.input_dir,
            input,
            status,
        ) {
            Ok(dir) => dir,
            Err(e) => {
                return match e.downcast_ref::<ImportError>() {
                    Some(ImportError::EmptyInputDirectory(_)) => {
                        writeln!(status, "No folders found inside the input directory.")?;
                        Ok(None)
                    }
                    _ => Err(e),
                };
            }
        };

        match load_export_bundle(&export_dir) {
            Ok(bundle) => Ok(Some((export_dir, bundle))),
            Err(e) => match e.downcast_ref::<ImportError>() {
                Some(missing @ ImportError::MissingInput(_)) => {
                    writeln!(status, "{}", missing)?;
                    Ok(None)
                }
                _ => Err(e),
            },
        }
    }

    fn stream_work_set(
        &self,
        work_set: &ExportBundle,
        sink: &mut dyn TurnSink,
        report: &mut ImportReport,
    ) -> Result<()> {
        for (key, record) in work_set {
            match linearize(record, DEFAULT_CONVERSATION_ID) {
                Ok(turns) => {
                    log_conversation(key, record, turns.len());
                    for turn in &turns {
                        sink.emit(turn)?;
                    }
                    report.processed += 1;
                    report.turns_emitted += turns.len();
                }
                Err(error) => {
                    tracing::warn!("Skipping conversation {}: {}", key, error);
                    report.failures.push(RecordFailure { key: key.clone(), error });
                }
            }
        }
        Ok(())
    }
}

fn log_conversation(key: &str, record: &Value, turns: usize) {
    let meta = ConversationMeta::of(record);
    tracing::info!(
        key,
        title = meta.title.as_deref().unwrap_or(""),
        created = ?meta.create_time,
        turns,
        "linearized conversation"
    );
}
