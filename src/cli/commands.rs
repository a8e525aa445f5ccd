use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cache::DEFAULT_CACHE_PATH;
use crate::import::{DEFAULT_INPUT_DIR, ImportConfig, ImportReport, Importer, OutputFormat};
use crate::utils::{format_path_with_tilde, init_logging};

#[derive(Parser)]
#[command(name = "chat-import")]
#[command(version = "0.1.0")]
#[command(about = "Import ChatGPT conversation exports as alternating user/assistant turns", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Export folder containing conversations.json (skips prompting and discovery)
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    /// Folder scanned for export subfolders
    #[arg(long, global = true, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Seen-chat cache file
    #[arg(long, global = true, default_value = DEFAULT_CACHE_PATH)]
    pub cache_file: PathBuf,

    /// Record imported chats in the seen-chat cache so later runs skip them
    #[arg(long)]
    pub save_cache: bool,

    /// Do not wait for Enter between turns
    #[arg(long)]
    pub no_pause: bool,

    /// Output format for turns
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print new conversations turn by turn (default)
    Import,
    /// Show how many conversations the export holds and how many are new
    Stats,
}

impl Cli {
    fn to_config(&self) -> ImportConfig {
        ImportConfig {
            export_dir: self.export_dir.clone(),
            input_dir: self.input_dir.clone(),
            cache_path: self.cache_file.clone(),
            save_cache: self.save_cache,
            pause: !self.no_pause && self.format == OutputFormat::Console,
            format: self.format,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let importer = Importer::new(cli.to_config());

    match &cli.command {
        Some(Commands::Stats) => show_stats(&importer)?,
        Some(Commands::Import) | None => run_import(&importer)?,
    }

    Ok(())
}

fn run_import(importer: &Importer) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    // JSONL keeps stdout machine-readable; status lines move to stderr
    let report = match importer.config().format {
        OutputFormat::Console => importer.run(&mut input, &mut output, &mut io::stdout())?,
        OutputFormat::Jsonl => importer.run(&mut input, &mut output, &mut io::stderr())?,
    };
    output.flush()?;

    log_report(&report);
    Ok(())
}

fn log_report(report: &ImportReport) {
    tracing::info!(
        total = report.total_conversations,
        new = report.new_conversations,
        processed = report.processed,
        failed = report.failures.len(),
        turns = report.turns_emitted,
        cache_saved = report.cache_saved,
        "import finished"
    );
}

fn show_stats(importer: &Importer) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let Some(stats) = importer.stats(&mut input, &mut stdout)? else {
        return Ok(());
    };

    println!("Chat Export Statistics");
    println!("======================");
    println!("Total conversations: {}", stats.total_conversations);
    println!("  Already seen: {}", stats.seen_conversations);
    println!("  New: {}", stats.new_conversations);
    println!();
    println!("Export folder: {}", format_path_with_tilde(&stats.export_dir));
    println!("Cache file: {}", format_path_with_tilde(&importer.config().cache_path));

    if let Some(oldest) = stats.oldest {
        println!("Oldest conversation: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = stats.newest {
        println!("Newest conversation: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chat-import"]).unwrap();
        let config = cli.to_config();
        assert!(cli.command.is_none());
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.cache_path, PathBuf::from(".cache/seen_chats.json"));
        assert!(!config.save_cache);
        assert!(config.pause);
        assert_eq!(config.format, OutputFormat::Console);
    }

    #[test]
    fn test_jsonl_never_pauses() {
        let cli = Cli::try_parse_from(["chat-import", "--format", "jsonl"]).unwrap();
        assert!(!cli.to_config().pause);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["chat-import", "stats", "--export-dir", "/tmp/export"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats)));
        assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp/export")));
    }

    #[test]
    fn test_import_flags() {
        let cli = Cli::try_parse_from(["chat-import", "--save-cache", "--no-pause", "import"])
            .unwrap();
        let config = cli.to_config();
        assert!(config.save_cache);
        assert!(!config.pause);
        assert!(matches!(cli.command, Some(Commands::Import)));
    }
}
