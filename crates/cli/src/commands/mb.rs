//! mb command - Make container
//!
//! Creates a container in the account. An existing container is reported,
//! not treated as an error.

use clap::Args;
use serde::Serialize;

use bf_core::BlobFacade;

use super::CommandResult;
use crate::output::Formatter;

/// Create a container
#[derive(Args, Debug)]
pub struct MbArgs {
    /// Container name
    pub name: String,
}

#[derive(Debug, Serialize)]
struct MbOutput {
    status: &'static str,
    container: String,
    created: bool,
    message: String,
}

/// Execute the mb command
pub fn execute(args: MbArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let outcome = facade.create_container(&args.name)?;

    let output = MbOutput {
        status: "success",
        container: outcome.name().to_string(),
        created: outcome.created(),
        message: outcome.to_string(),
    };
    formatter.report(&output, &output.message);
    Ok(())
}
