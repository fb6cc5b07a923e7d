//! schedgen — batch generation of per-company Schedule 9 documents.
//!
//! # Usage
//!
//! ```text
//! schedgen run [--dry-run] [--json]
//! schedgen check
//! ```
//!
//! Inputs are fixed by convention: `input/template.docx` and
//! `input/companyList.xlsx`, with documents written to `output/`.
//! There are no path flags and no environment configuration.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, run::RunArgs};

#[derive(Parser, Debug)]
#[command(
    name = "schedgen",
    version,
    about = "Merge a company spreadsheet into Schedule 9 documents and render PDFs",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge every spreadsheet row into the template and render PDFs.
    Run(RunArgs),

    /// Validate the template's placeholder markup and exit.
    Check(CheckArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}
