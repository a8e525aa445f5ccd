use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::models::Turn;
use crate::utils::strip_ansi_codes;

/// How linearized turns are written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines, pausing for Enter after each turn
    #[default]
    Console,
    /// One JSON object per turn, no pausing
    Jsonl,
}

/// Destination for linearized turns
pub trait TurnSink {
    fn emit(&mut self, turn: &Turn) -> Result<()>;
}

/// Prints each turn for an operator and waits for a line of input before continuing
pub struct ConsoleSink<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    pause: bool,
}

impl<'a> ConsoleSink<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write, pause: bool) -> Self {
        Self { input, output, pause }
    }
}

impl TurnSink for ConsoleSink<'_> {
    fn emit(&mut self, turn: &Turn) -> Result<()> {
        writeln!(
            self.output,
            "Role: {}, Text: {}, Conversation ID: {}",
            turn.role,
            strip_ansi_codes(&turn.text),
            turn.conversation_id
        )?;
        writeln!(self.output, "\n---\n")?;
        self.output.flush()?;

        if self.pause {
            let mut ack = String::new();
            // EOF just means nobody is there to acknowledge; keep going
            self.input.read_line(&mut ack).context("Failed to read acknowledgment")?;
        }
        Ok(())
    }
}

/// Writes each turn as a single JSON line
pub struct JsonLinesSink<'a> {
    output: &'a mut dyn Write,
}

impl<'a> JsonLinesSink<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Self { output }
    }
}

impl TurnSink for JsonLinesSink<'_> {
    fn emit(&mut self, turn: &Turn) -> Result<()> {
        serde_json::to_writer(&mut *self.output, turn).context("Failed to serialize turn")?;
        writeln!(self.output)?;
        Ok(())
    }
}
