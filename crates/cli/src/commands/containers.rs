//! containers command - List containers in the account

use serde::Serialize;

use bf_core::BlobFacade;

use super::CommandResult;
use crate::output::Formatter;

#[derive(Debug, Serialize)]
struct ContainersOutput {
    containers: Vec<String>,
}

/// Execute the containers command
pub fn execute(facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let containers = facade.list_containers()?;

    if formatter.is_json() {
        formatter.json(&ContainersOutput { containers });
    } else {
        for name in &containers {
            formatter.println(&format!("{name}/"));
        }
    }
    Ok(())
}
