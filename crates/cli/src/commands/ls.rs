//! ls command - List blobs
//!
//! Lists blobs in the bound container, optionally filtered by prefix and
//! suffix. Configured defaults apply when no filter is given.

use clap::Args;
use humansize::{BINARY, format_size};
use serde::Serialize;

use bf_core::{BlobFacade, BlobInfo};

use super::CommandResult;
use crate::output::Formatter;

/// List blobs
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only blobs whose names start with this (overrides BLOB_PREFIX)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only blobs whose names end with this (overrides BLOB_SUFFIX)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Show size and last-modified time
    #[arg(short, long)]
    pub long: bool,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    container: String,
    items: Vec<BlobInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_blobs: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

impl Summary {
    fn of(items: &[BlobInfo]) -> Self {
        let total_size_bytes: u64 = items.iter().filter_map(|b| b.size_bytes).sum();
        Self {
            total_blobs: items.len(),
            total_size_bytes,
            total_size_human: format_size(total_size_bytes, BINARY),
        }
    }
}

/// Execute the ls command
pub fn execute(args: LsArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let items = if args.long || args.summarize || formatter.is_json() {
        facade.list_blob_details(args.prefix.as_deref(), args.suffix.as_deref())?
    } else {
        facade
            .list_blobs(args.prefix.as_deref(), args.suffix.as_deref())?
            .into_iter()
            .map(BlobInfo::new)
            .collect()
    };

    if formatter.is_json() {
        let output = LsOutput {
            container: facade.container_name().to_string(),
            summary: args.summarize.then(|| Summary::of(&items)),
            items,
        };
        formatter.json(&output);
        return Ok(());
    }

    for blob in &items {
        if args.long {
            formatter.println(&long_line(blob));
        } else {
            formatter.println(&blob.name);
        }
    }
    if args.summarize {
        let summary = Summary::of(&items);
        formatter.println(&format!(
            "\nTotal: {} blobs, {}",
            summary.total_blobs, summary.total_size_human
        ));
    }
    Ok(())
}

fn long_line(blob: &BlobInfo) -> String {
    let date = blob
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(19));
    let size = blob
        .size_bytes
        .map(|s| format_size(s, BINARY))
        .unwrap_or_default();
    format!("[{date}] {size:>10} {}", blob.name)
}
