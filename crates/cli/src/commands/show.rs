//! show command - Print a tabular blob
//!
//! Decodes a blob and prints its first rows as a table, or as JSON rows with
//! `--json`.

use arrow::json::ArrayWriter;
use clap::Args;
use serde::Serialize;

use bf_core::{BlobFacade, Table};
use bf_tabular::{CodecError, Format};

use super::convert::{parse_format, resolve_format};
use super::CommandResult;
use crate::output::{Formatter, ProgressBar};

/// Print a tabular blob
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Blob to decode
    pub blob: String,

    /// Blob format (parquet, csv, xlsx); inferred from the name if omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<Format>,

    /// Maximum number of rows to print
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    blob: String,
    format: &'static str,
    columns: Vec<String>,
    total_rows: usize,
    rows: serde_json::Value,
}

/// Execute the show command
pub fn execute(args: ShowArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let format = resolve_format(args.format, &args.blob)?;

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Reading {}", args.blob));
    let table = facade.read_table(&args.blob, format)?;
    spinner.finish_and_clear();

    if formatter.is_json() {
        formatter.json(&ShowOutput {
            format: format.name(),
            columns: table.column_names().into_iter().map(str::to_owned).collect(),
            total_rows: table.num_rows(),
            rows: json_rows(&table, args.limit)?,
            blob: args.blob,
        });
        return Ok(());
    }

    formatter.println(&table.pretty(Some(args.limit))?);
    if table.num_rows() > args.limit {
        formatter.warning(&format!(
            "Showing {} of {} rows",
            args.limit,
            table.num_rows()
        ));
    }
    Ok(())
}

/// First `limit` rows as a JSON array of objects
fn json_rows(table: &Table, limit: usize) -> Result<serde_json::Value, CodecError> {
    let batch = table.batch().slice(0, limit.min(table.num_rows()));
    let mut writer = ArrayWriter::new(Vec::new());
    writer.write(&batch)?;
    writer.finish()?;
    let bytes = writer.into_inner();
    if bytes.is_empty() {
        return Ok(serde_json::Value::Array(Vec::new()));
    }
    serde_json::from_slice(&bytes).map_err(|e| CodecError::Invalid(e.to_string()))
}
