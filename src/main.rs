use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use modsweep::commands::{config_cmd::ConfigOptions, run::RunOptions, scan::ScanOptions};
use modsweep::commands::{execute_config, execute_run, execute_scan};
use modsweep::error::AppError;
use modsweep::logging;
use modsweep::path::resolve_roots_with_current;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            logging::init(args.common.verbose);
            let options = ScanOptions {
                roots: resolve_roots_with_current(&args.common.paths, args.common.current),
                skip: args.common.skip,
                verbose: args.common.verbose,
                json: args.common.json,
            };
            execute_scan(options)?;
        }
        Commands::Run(args) => {
            logging::init(args.common.verbose);
            let options = RunOptions {
                roots: resolve_roots_with_current(&args.common.paths, args.common.current),
                skip: args.common.skip,
                verbose: args.common.verbose,
                assume_yes: args.yes,
                json: args.common.json,
            };
            let summary = execute_run(options)?;
            if summary.has_errors() {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Config(args) => {
            logging::init(false);
            execute_config(ConfigOptions { show_path: args.path })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Parser)]
#[command(
    name = "modsweep",
    version,
    about = "Find JavaScript projects and delete their node_modules to reclaim disk space."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report projects and how much their dependencies take, without deleting.
    #[command(visible_alias = "sc")]
    Scan(ScanArgs),
    /// Delete the dependency directory of every project found.
    #[command(visible_alias = "rn")]
    Run(RunArgs),
    /// Show where the configuration file lives and what it contains.
    #[command(visible_alias = "cfg")]
    Config(ConfigArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Directory to leave untouched, along with everything below it.
    #[arg(short = 's', long = "skip", value_name = "PATH", action = ArgAction::Append)]
    skip: Vec<PathBuf>,

    /// Show every project and per-project sizes, and enable debug diagnostics.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print the result as JSON.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Use the current directory as the only root.
    #[arg(short = 'c', long = "current", action = ArgAction::SetTrue, conflicts_with = "paths")]
    current: bool,

    /// Root directories to search (defaults to the current directory).
    #[arg(value_name = "PATH", num_args = 0..)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    yes: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Only print the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,
}
