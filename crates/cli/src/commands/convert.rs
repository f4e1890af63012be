//! convert command - Re-encode a tabular blob
//!
//! Decodes the source blob and uploads it to the destination in another
//! format, replacing any existing destination blob. Formats are inferred
//! from the blob names unless given.

use clap::Args;
use serde::Serialize;

use bf_core::BlobFacade;
use bf_tabular::Format;

use super::{CommandError, CommandResult};
use crate::output::{Formatter, ProgressBar};

/// Convert a blob between tabular formats
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source blob
    pub source: String,

    /// Destination blob
    pub destination: String,

    /// Source format (parquet, csv, xlsx)
    #[arg(long, value_parser = parse_format)]
    pub from: Option<Format>,

    /// Destination format (parquet, csv, xlsx)
    #[arg(long, value_parser = parse_format)]
    pub to: Option<Format>,
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    status: &'static str,
    source: String,
    destination: String,
    from: &'static str,
    to: &'static str,
    rows: usize,
    columns: usize,
}

/// Parse a `--format` style argument
pub(crate) fn parse_format(s: &str) -> Result<Format, String> {
    s.parse::<Format>().map_err(|e| e.to_string())
}

/// Format given explicitly, or inferred from the blob name
pub(crate) fn resolve_format(explicit: Option<Format>, blob: &str) -> Result<Format, CommandError> {
    match explicit {
        Some(format) => Ok(format),
        None => Format::from_path(blob)
            .map_err(|e| CommandError::Usage(format!("{e}; pass the format explicitly"))),
    }
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, facade: &BlobFacade, formatter: &Formatter) -> CommandResult {
    let from = resolve_format(args.from, &args.source)?;
    let to = resolve_format(args.to, &args.destination)?;

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Reading {}", args.source));
    let table = facade.read_table(&args.source, from)?;
    spinner.set_message(&format!("Writing {}", args.destination));
    let message = facade.write_table(&table, &args.destination, to)?;
    spinner.finish_and_clear();

    let output = ConvertOutput {
        status: "success",
        source: args.source,
        destination: args.destination,
        from: from.name(),
        to: to.name(),
        rows: table.num_rows(),
        columns: table.num_columns(),
    };
    formatter.report(&output, message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::exit_code::ExitCode;

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, "t.parquet").unwrap(), Format::Parquet);
        assert_eq!(
            resolve_format(Some(Format::Csv), "t.parquet").unwrap(),
            Format::Csv
        );
        let err = resolve_format(None, "no-extension").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::UsageError);
    }

    #[test]
    fn test_parse_format_names() {
        assert_eq!(parse_format("excel").unwrap(), Format::Xlsx);
        assert!(parse_format("json").is_err());
    }

    #[test]
    fn test_execute_csv_to_parquet() {
        let connector = testing::connector();
        let facade = testing::facade(&connector);
        facade.upload_blob("in.csv", "id,name\n1,ann\n2,bo\n", false).unwrap();

        let args = ConvertArgs {
            source: "in.csv".into(),
            destination: "out.parquet".into(),
            from: None,
            to: None,
        };
        execute(args, &facade, &testing::quiet()).unwrap();

        let table = facade.parquet_to_table("out.parquet").unwrap();
        assert_eq!(table.column_names(), vec!["id", "name"]);
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_execute_missing_source_uses_conversion_verb() {
        let connector = testing::connector();
        let facade = testing::facade(&connector);
        let args = ConvertArgs {
            source: "missing.xlsx".into(),
            destination: "out.csv".into(),
            from: None,
            to: None,
        };
        let err = execute(args, &facade, &testing::quiet()).unwrap_err();
        assert!(err.to_string().starts_with("Error converting Excel to table: "));
        assert_eq!(err.exit_code(), ExitCode::NotFound);
    }
}
