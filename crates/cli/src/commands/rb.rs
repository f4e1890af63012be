//! rb command - Remove container
//!
//! Deletes a container together with every blob in it. Requires `--force`.

use clap::Args;
use serde::Serialize;

use bf_core::BlobFacade;

use super::{CommandError, CommandResult};
use crate::output::Formatter;

/// Remove a container
#[derive(Args, Debug)]
pub struct RbArgs {
    /// Container name
    pub name: String,

    /// Confirm deletion of the container and all of its blobs
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RbOutput {
    status: &'static str,
    container: String,
    message: String,
}

/// Execute the rb command
pub fn execute(args: RbArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    if !args.force {
        return Err(CommandError::Usage(format!(
            "Refusing to delete container '{}' and all of its blobs without --force",
            args.name
        )));
    }

    let message = facade.delete_container(&args.name)?;

    let output = RbOutput {
        status: "success",
        container: args.name,
        message,
    };
    formatter.report(&output, &output.message);
    Ok(())
}
