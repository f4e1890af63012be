//! CLI command definitions and execution
//!
//! Every command except `config` runs against a `BlobFacade` built once from
//! the global flags, the environment (and `.env`) and the settings file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use bf_azure::AzureConnector;
use bf_core::{
    BlobFacade, ConfigSource, ConnectOptions, Connector, EnvSource, FileSource, LayeredSource,
    SettingsManager,
};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod config;
mod containers;
mod convert;
mod get;
mod ls;
mod mb;
mod put;
mod rb;
mod rm;
mod show;

/// bf - Azure Blob Storage client with tabular conversion
///
/// Lists, uploads, downloads and deletes blobs in one container, and converts
/// tables between Parquet, CSV and Excel.
#[derive(Parser, Debug)]
#[command(name = "bf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Storage account connection string (overrides AZURE_STORAGE_CONNECTION_STRING)
    #[arg(long, global = true)]
    pub connection_string: Option<String>,

    /// Container to operate on (overrides CONTAINER_NAME)
    #[arg(long, global = true)]
    pub container: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Storage(StorageCommands),

    /// Manage the settings file
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Commands that run against the bound account and container
#[derive(Subcommand, Debug)]
pub enum StorageCommands {
    /// List blobs in the container
    Ls(ls::LsArgs),

    /// List containers in the account
    Containers,

    /// Create a container
    Mb(mb::MbArgs),

    /// Remove a container and all of its blobs
    Rb(rb::RbArgs),

    /// Upload a file or stdin to a blob
    Put(put::PutArgs),

    /// Download a blob to a file or stdout
    Get(get::GetArgs),

    /// Remove blobs
    Rm(rm::RmArgs),

    /// Convert a tabular blob to another format
    Convert(convert::ConvertArgs),

    /// Print a tabular blob as a table
    Show(show::ShowArgs),
}

/// Failure of a single command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] bf_core::Error),

    #[error(transparent)]
    Codec(#[from] bf_tabular::CodecError),

    /// Bad arguments detected by the CLI itself
    #[error("{0}")]
    Usage(String),

    /// Local file could not be read or written
    #[error("Failed to access {}: {source}", path.display())]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failures were already printed; only the exit code remains
    #[error("{} failed", .0)]
    Reported(ExitCode),
}

impl CommandError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CommandError::Core(e) => ExitCode::from_error(e),
            CommandError::Codec(_) | CommandError::Local { .. } => ExitCode::GeneralError,
            CommandError::Usage(_) => ExitCode::UsageError,
            CommandError::Reported(code) => *code,
        }
    }

    pub(crate) fn local(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CommandError::Local { path, source }
    }
}

pub type CommandResult = std::result::Result<(), CommandError>;

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(output_config(&cli));

    let result = match cli.command {
        Commands::Config(cmd) => config::execute(cmd, &formatter),
        Commands::Storage(command) => settings_source()
            .and_then(|source| {
                let connector = AzureConnector::new().map_err(bf_core::Error::Connection)?;
                Ok((source, connector))
            })
            .map_err(CommandError::from)
            .and_then(|(source, connector)| {
                let options = ConnectOptions {
                    connection_string: cli.connection_string,
                    container: cli.container,
                };
                run(command, &connector, &source, &options, &formatter)
            }),
    };

    finish(result, &formatter)
}

/// Execute with an explicit connector and configuration source
///
/// The settings file and `.env` are not consulted.
pub fn execute_with(cli: Cli, connector: &dyn Connector, source: &dyn ConfigSource) -> ExitCode {
    let formatter = Formatter::new(output_config(&cli));
    let options = ConnectOptions {
        connection_string: cli.connection_string,
        container: cli.container,
    };
    let result = match cli.command {
        Commands::Config(cmd) => config::execute(cmd, &formatter),
        Commands::Storage(command) => run(command, connector, source, &options, &formatter),
    };
    finish(result, &formatter)
}

fn output_config(cli: &Cli) -> OutputConfig {
    OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    }
}

/// Environment (after loading `.env`) layered over the settings file
fn settings_source() -> bf_core::Result<LayeredSource> {
    let file = FileSource::load(&SettingsManager::new()?)?;
    Ok(LayeredSource::new()
        .with(EnvSource::with_dotenv())
        .with(file))
}

fn run(
    command: StorageCommands,
    connector: &dyn Connector,
    source: &dyn ConfigSource,
    options: &ConnectOptions,
    formatter: &Formatter,
) -> CommandResult {
    let facade = BlobFacade::connect(connector, source, options)?;

    match command {
        StorageCommands::Ls(args) => ls::execute(args, &facade, formatter),
        StorageCommands::Containers => containers::execute(&facade, formatter),
        StorageCommands::Mb(args) => mb::execute(args, &facade, formatter),
        StorageCommands::Rb(args) => rb::execute(args, &facade, formatter),
        StorageCommands::Put(args) => put::execute(args, &facade, formatter),
        StorageCommands::Get(args) => get::execute(args, &facade, formatter),
        StorageCommands::Rm(args) => rm::execute(args, &facade, formatter),
        StorageCommands::Convert(args) => convert::execute(args, &facade, formatter),
        StorageCommands::Show(args) => show::execute(args, &facade, formatter),
    }
}

fn finish(result: CommandResult, formatter: &Formatter) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            let code = e.exit_code();
            if !matches!(e, CommandError::Reported(_)) {
                warn!(exit_code = code.as_i32(), "Command failed: {e}");
                formatter.error(&e.to_string(), code);
            }
            code
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for running commands against the in-memory backend

    use bf_core::{BlobFacade, ConnectOptions, MapSource, MemoryAccount, MemoryConnector};

    use crate::output::{Formatter, OutputConfig};

    /// Connector with an existing container named `test`
    pub fn connector() -> MemoryConnector {
        MemoryConnector::with_account(MemoryAccount::new().with_container("test"))
    }

    pub fn facade(connector: &MemoryConnector) -> BlobFacade {
        let options = ConnectOptions::new()
            .with_connection_string("SEC")
            .with_container("test");
        BlobFacade::connect(connector, &MapSource::new(), &options).unwrap()
    }

    pub fn quiet() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            no_progress: true,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::{AccountStore, MapSource};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["ls", "--json", "--container", "c", "--prefix", "a/"]);
        assert!(cli.json);
        assert_eq!(cli.container.as_deref(), Some("c"));
        assert!(matches!(
            cli.command,
            Commands::Storage(StorageCommands::Ls(_))
        ));
    }

    #[test]
    fn test_config_is_separate_from_storage_commands() {
        assert!(matches!(
            parse(&["config", "path"]).command,
            Commands::Config(config::ConfigCommands::Path)
        ));
        assert!(matches!(
            parse(&["containers"]).command,
            Commands::Storage(StorageCommands::Containers)
        ));
    }

    #[test]
    fn test_missing_connection_string_is_usage_error() {
        let code = execute_with(
            parse(&["-q", "containers"]),
            &testing::connector(),
            &MapSource::new().with("CONTAINER_NAME", "test"),
        );
        assert_eq!(code, ExitCode::UsageError);
    }

    #[test]
    fn test_execute_with_memory_backend() {
        let connector = testing::connector();
        let source = MapSource::new()
            .with("AZURE_STORAGE_CONNECTION_STRING", "SEC")
            .with("CONTAINER_NAME", "test");

        assert_eq!(
            execute_with(parse(&["-q", "mb", "fresh"]), &connector, &source),
            ExitCode::Success
        );
        assert!(connector.account().list_containers().unwrap().contains(&"fresh".to_string()));
        assert_eq!(
            execute_with(parse(&["-q", "get", "missing", "-o", "out.bin"]), &connector, &source),
            ExitCode::NotFound
        );
    }

    #[test]
    fn test_command_error_exit_codes() {
        assert_eq!(
            CommandError::Usage("bad".into()).exit_code(),
            ExitCode::UsageError
        );
        assert_eq!(
            CommandError::Reported(ExitCode::Conflict).exit_code(),
            ExitCode::Conflict
        );
        let local = CommandError::local("/nope")(std::io::Error::other("denied"));
        assert_eq!(local.exit_code(), ExitCode::GeneralError);
        assert_eq!(local.to_string(), "Failed to access /nope: denied");
    }
}
