//! bf - Azure Blob Storage client
//!
//! A command-line interface for one Azure Blob Storage container, with
//! conversion between Parquet, CSV and Excel tables.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use blobframe_cli::commands::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // --debug wins over RUST_LOG
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli);

    std::process::exit(exit_code.as_i32());
}
