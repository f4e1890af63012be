//! get command - Download a blob
//!
//! Writes the blob to a file with `-o`, otherwise to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use humansize::{BINARY, format_size};
use serde::Serialize;

use bf_core::BlobFacade;

use super::{CommandError, CommandResult};
use crate::output::{Formatter, ProgressBar};

/// Download a blob
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Blob name in the container
    pub blob: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    status: &'static str,
    blob: String,
    path: String,
    size_bytes: usize,
}

/// Execute the get command
pub fn execute(args: GetArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Downloading {}", args.blob));
    let data = facade.download_blob(&args.blob)?;
    spinner.finish_and_clear();

    let Some(path) = args.output else {
        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(&data)
            .and_then(|()| stdout.flush())
            .map_err(CommandError::local("stdout"));
    };

    std::fs::write(&path, &data).map_err(CommandError::local(&path))?;

    let message = format!(
        "Downloaded '{}' to {} ({})",
        args.blob,
        path.display(),
        format_size(data.len(), BINARY)
    );
    let output = GetOutput {
        status: "success",
        blob: args.blob,
        path: path.display().to_string(),
        size_bytes: data.len(),
    };
    formatter.report(&output, message);
    Ok(())
}
