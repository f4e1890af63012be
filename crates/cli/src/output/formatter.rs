//! Rendering of command results
//!
//! Every storage command ends in exactly one of: a JSON document, a `✓` line,
//! or listing lines. Failures are `✗` lines on stderr, or an error document
//! in JSON mode.

use std::fmt::Display;

use serde::Serialize;

use super::OutputConfig;
use crate::exit_code::ExitCode;

/// Prefix of a result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Done,
    Failed,
    Warning,
}

impl Mark {
    pub const fn symbol(self) -> &'static str {
        match self {
            Mark::Done => "✓",
            Mark::Failed => "✗",
            Mark::Warning => "⚠",
        }
    }

    const fn ansi(self) -> &'static str {
        match self {
            Mark::Done => "32",
            Mark::Failed => "31",
            Mark::Warning => "33",
        }
    }

    /// Render `message` behind this mark
    pub fn line(self, message: &str, colored: bool) -> String {
        if colored {
            format!("\x1b[{}m{}\x1b[0m {message}", self.ansi(), self.symbol())
        } else {
            format!("{} {message}", self.symbol())
        }
    }
}

/// Writes command results to stdout and failures to stderr
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Finish a single-result command: `output` in JSON mode, otherwise
    /// `message` as a `✓` line
    pub fn report<T: Serialize>(&self, output: &T, message: impl Display) {
        if self.config.json {
            self.json(output);
        } else {
            self.done(&message.to_string());
        }
    }

    /// `✓` line for one completed item
    pub fn done(&self, message: &str) {
        if self.config.human() {
            println!("{}", Mark::Done.line(message, self.config.colored()));
        }
    }

    /// `✗` line for one failed item of a multi-item command
    ///
    /// Nothing is printed in JSON mode; the command's document lists the
    /// failures instead.
    pub fn failed(&self, message: &str) {
        if !self.config.json {
            eprintln!("{}", Mark::Failed.line(message, self.config.colored()));
        }
    }

    pub fn warning(&self, message: &str) {
        if self.config.human() {
            eprintln!("{}", Mark::Warning.line(message, self.config.colored()));
        }
    }

    /// Report the error that ended a command, even in quiet mode
    pub fn error(&self, message: &str, code: ExitCode) {
        if self.config.json {
            eprintln!("{}", error_document(message, code));
        } else {
            eprintln!("{}", Mark::Failed.line(message, self.config.colored()));
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Listing or table line; suppressed by `--quiet`
    pub fn println(&self, line: &str) {
        if !self.config.quiet {
            println!("{line}");
        }
    }
}

fn error_document(message: &str, code: ExitCode) -> String {
    let document = serde_json::json!({
        "error": message,
        "exit_code": code.as_i32(),
    });
    serde_json::to_string_pretty(&document).unwrap_or_else(|_| message.to_string())
}
