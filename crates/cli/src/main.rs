use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use covtask_core::{CovtaskError, Project};
use tracing_subscriber::EnvFilter;

mod commands;

/// covtask - run C unit-test tasks and render lcov coverage reports
#[derive(Parser)]
#[command(name = "covtask")]
#[command(about = "Run test-framework tasks and render lcov/genhtml coverage reports")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    project: PathBuf,

    /// Log every spawned command
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tasks and their dependencies (the default task when none is given)
    Run {
        /// Task names, e.g. "default" or "coverage"
        tasks: Vec<String>,
    },
    /// Show execution order for tasks without running them
    Plan {
        /// Task names, e.g. "default" or "coverage"
        tasks: Vec<String>,
    },
    /// List the tasks defined for the project
    List,
    /// Show the directories and files the coverage report uses
    Paths,
    /// Print the JSON schema of covtask.yml
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::Run { tasks } => commands::run::execute(&load_project(&cli.project)?, &tasks),
        Commands::Plan { tasks } => commands::plan::execute(&load_project(&cli.project)?, &tasks),
        Commands::List => commands::list::execute(&load_project(&cli.project)?),
        Commands::Paths => commands::paths::execute(&load_project(&cli.project)?),
        Commands::Schema => commands::schema::execute(),
    }
}

fn load_project(path: &Path) -> Result<Project> {
    Project::load(path)
        .with_context(|| format!("Failed to load project at {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A failed external command hands its exit code through
fn exit_status(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<CovtaskError>()
        .map(CovtaskError::exit_code)
        .unwrap_or(1);
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
