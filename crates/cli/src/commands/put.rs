//! put command - Upload a blob
//!
//! Uploads a local file, or stdin when the source is `-`. The content type
//! is guessed from the blob name.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use bf_core::{BlobFacade, Payload};

use super::{CommandError, CommandResult};
use crate::output::{Formatter, ProgressBar};

/// Upload a blob
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload, or - for stdin
    pub source: PathBuf,

    /// Blob name in the container
    pub blob: String,

    /// Replace the blob if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    blob: String,
    source: String,
    message: String,
}

/// Execute the put command
pub fn execute(args: PutArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let payload = open_source(&args.source)?;

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Uploading {}", args.blob));
    let message = facade.upload_blob(&args.blob, payload, args.overwrite)?;
    spinner.finish_and_clear();

    let output = PutOutput {
        status: "success",
        blob: args.blob,
        source: args.source.display().to_string(),
        message,
    };
    formatter.report(&output, &output.message);
    Ok(())
}

fn open_source(source: &Path) -> Result<Payload<'static>, CommandError> {
    if source.as_os_str() == "-" {
        return Ok(Payload::reader(io::stdin().lock()));
    }
    let file = File::open(source).map_err(CommandError::local(source))?;
    Ok(Payload::reader(BufReader::new(file)))
}
