//! DWH Sizer CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Storage error
//! - 5: Report error

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sizer_core::SizingError;
use sizer_report::ReportError;
use sizer_store::StoreError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIGURATION_ERROR: u8 = 3;
    pub const STORAGE_ERROR: u8 = 4;
    pub const REPORT_ERROR: u8 = 5;
}

/// Options shared by every command.
pub struct GlobalOptions {
    pub data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let global = GlobalOptions {
        data_dir: cli.data_dir.clone(),
    };

    let result = match cli.command {
        Commands::Size(args) => commands::size::execute(args, &global).await,
        Commands::Compare(args) => commands::compare::execute(args).await,
        Commands::Catalog(args) => commands::catalog::execute(args).await,
        Commands::Specs(args) => commands::specs::execute(args).await,
        Commands::History(args) => commands::history::execute(args, &global).await,
        Commands::Saved(args) => commands::saved::execute(args, &global).await,
        Commands::Share(args) => commands::share::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(cli: &Cli) {
    let default_directives = if cli.quiet {
        "error"
    } else if cli.verbose {
        "sizer=debug,warn"
    } else {
        "sizer=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let json_layer = cli
        .log_json
        .then(|| fmt::layer().json().with_target(false).with_writer(std::io::stderr));
    let text_layer = (!cli.log_json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let log_result = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<SizingError>() {
            return if err.is_configuration_error() {
                ExitCodes::CONFIGURATION_ERROR
            } else if matches!(err, SizingError::Io(_)) {
                ExitCodes::INVALID_ARGS
            } else {
                ExitCodes::GENERAL_ERROR
            };
        }
        if cause.downcast_ref::<StoreError>().is_some() {
            return ExitCodes::STORAGE_ERROR;
        }
        if let Some(err) = cause.downcast_ref::<ReportError>() {
            return match err {
                ReportError::Sizing(_) => ExitCodes::CONFIGURATION_ERROR,
                ReportError::InvalidShareLink(_) => ExitCodes::INVALID_ARGS,
                _ => ExitCodes::REPORT_ERROR,
            };
        }
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else if msg.contains("config") {
        ExitCodes::CONFIGURATION_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
