//! Stencil — framework template installer CLI.
//!
//! # Usage
//!
//! ```text
//! stencil                                  (same as `stencil install`)
//! stencil install [--source <dir>] [--dry-run]
//! stencil status [--source <dir>] [--json]
//! stencil diff [--source <dir>]
//! ```
//!
//! The source checkout defaults to the current directory and may be
//! overridden by `$STENCIL_SOURCE` or `--source`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, install::InstallArgs, status::StatusArgs};

#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Install framework personas and helper scripts into ~/.stencil",
    long_about = None,
)]
struct Cli {
    /// Defaults to `install` when no subcommand is given.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy personas and scripts into the target tree (copy-if-different).
    Install(InstallArgs),

    /// Show per-file install state without writing anything.
    Status(StatusArgs),

    /// Show unified diffs of what install would overwrite.
    Diff(DiffArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Install(InstallArgs::default())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Commands::Install(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}
