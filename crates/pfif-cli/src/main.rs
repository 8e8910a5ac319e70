//! PFIF diff CLI
//!
//! Command-line interface for comparing PFIF documents

use clap::{Parser, Subcommand, ValueEnum};
use pfif_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pfif")]
#[command(about = "Compare PFIF person/note documents", long_about = None)]
struct Cli {
    /// Emit diagnostic logs on stderr in the given format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable
    Dev,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the differences between two PFIF files
    Diff(commands::diff::DiffArgs),
    /// Print the canonical record map of one PFIF file as JSON
    Canonical(commands::canonical::CanonicalArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        Some(LogFormat::Dev) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Canonical(args) => commands::canonical::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
