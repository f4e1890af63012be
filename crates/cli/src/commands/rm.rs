//! rm command - Remove blobs
//!
//! Removes one or more blobs. Every name is attempted; the exit code is that
//! of the first failure.

use clap::Args;
use serde::Serialize;

use bf_core::BlobFacade;

use super::{CommandError, CommandResult};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Remove blobs
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Blob name(s) to remove
    #[arg(required = true)]
    pub blobs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<String>,
    total: usize,
}

/// Execute the rm command
pub fn execute(args: RmArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let total = args.blobs.len();
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut first_failure: Option<ExitCode> = None;

    for blob in args.blobs {
        match facade.delete_blob(&blob) {
            Ok(message) => {
                formatter.done(&message);
                deleted.push(blob);
            }
            Err(e) => {
                tracing::warn!(blob = %blob, "Delete failed: {e}");
                formatter.failed(&e.to_string());
                first_failure.get_or_insert(ExitCode::from_error(&e));
                failed.push(blob);
            }
        }
    }

    if formatter.is_json() {
        formatter.json(&RmOutput {
            status: if failed.is_empty() { "success" } else { "partial" },
            deleted,
            failed,
            total,
        });
    }

    match first_failure {
        None => Ok(()),
        Some(code) => Err(CommandError::Reported(code)),
    }
}
