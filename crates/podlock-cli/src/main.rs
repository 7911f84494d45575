//! podlock CLI - generate, inspect and reconcile dependency lock files

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod diff;
mod lock;
mod logging;
mod show;

#[derive(Parser)]
#[command(name = "podlock")]
#[command(version = podlock::VERSION)]
#[command(about = "Generate and reconcile dependency lock files", long_about = None)]
struct Cli {
    #[command(flatten)]
    files: FileArgs,

    #[command(flatten)]
    log: logging::LogArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Locations of the files every command works on.
#[derive(Args, Debug, Clone)]
pub(crate) struct FileArgs {
    /// Path to the lock file
    #[arg(long, global = true, env = "PODLOCK_LOCKFILE", default_value = podlock::LOCK_FILE)]
    pub(crate) lockfile: PathBuf,

    /// Path to the declarations file
    #[arg(
        long,
        global = true,
        env = "PODLOCK_DECLARATIONS",
        default_value = podlock::DECLARATIONS_FILE
    )]
    pub(crate) declarations: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a lock file from the declarations and a resolver's output
    Lock {
        /// Path to the resolution file written by the resolver
        #[arg(long, default_value = lock::RESOLUTION_FILE)]
        resolution: PathBuf,

        /// Show what would change without writing the lock file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how the declarations differ from the lock file
    Diff,

    /// Exit with an error if the declarations differ from the lock file
    Check,

    /// Show the locked state of one package
    Show {
        /// Package name (root or sub-package)
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_global_subscriber(&cli.log);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let Cli { files, command, .. } = cli;

    match command {
        Commands::Lock {
            resolution,
            dry_run,
        } => {
            let options = lock::LockOptions {
                resolution,
                dry_run,
            };
            let result = lock::lock(&files, &options)?;
            print!("{}", diff::format_summary(&result.changes));
            let pods = result.lockfile.pods().len();
            match (result.modified, options.dry_run) {
                (false, _) => println!("Lock file unchanged ({pods} pods)"),
                (true, true) => println!("Lock file would be written ({pods} pods)"),
                (true, false) => println!("Wrote {} ({pods} pods)", files.lockfile.display()),
            }
        }

        Commands::Diff => {
            let changes = diff::diff(&files)?;
            print!("{}", diff::format_summary(&changes));
        }

        Commands::Check => {
            let changes = diff::diff(&files)?;
            if changes.has_changes() {
                print!("{}", diff::format_summary(&changes));
                println!("Lock file is out of date. Run `podlock lock` to update it.");
                return Ok(ExitCode::FAILURE);
            }
            println!("Lock file is up to date");
        }

        Commands::Show { name } => {
            print!("{}", show::show(&files.lockfile, &name)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
