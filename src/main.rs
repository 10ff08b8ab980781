//! python-versions - resolve the Python versions a project supports
//!
//! Reads pyproject.toml and prints:
//! - the supported versions, ascending and space-separated
//! - the highest of them as the build version
//! - a `{"python-version": [...]}` matrix for CI

use clap::Parser;
use colored::Colorize;
use python_versions::cli::CliArgs;
use python_versions::error::{AppError, ResolveError};
use python_versions::logging::{setup_logging, Level};
use python_versions::orchestrator::Orchestrator;
use python_versions::output::{create_formatter, OutputFormat};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    setup_logging(Level::from_cli(args.verbose, args.quiet));

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("python-versions v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Working directory: {}", args.working_directory.display());
        eprintln!("End-of-life mode: {}", args.eol_mode);
    }

    let orchestrator = Orchestrator::new(args.clone());
    let resolution = orchestrator.run().await?;

    if !args.quiet {
        for warning in &resolution.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
    }
    if args.verbose {
        eprintln!(
            "Resolved from {} using {} release data",
            resolution.manifest_path.display(),
            resolution.candidate_origin
        );
    }

    let formatter = create_formatter(OutputFormat::from_cli(args.json));
    let mut stdout = io::stdout().lock();
    formatter.format(&resolution, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn report_error(err: &anyhow::Error) {
    if let Some(AppError::Resolve(ResolveError::EndOfLife { violations })) =
        err.downcast_ref::<AppError>()
    {
        for violation in violations {
            eprintln!("{} {}", "error:".red().bold(), violation);
        }
    }
    eprintln!("{} {}", "Error:".red().bold(), err);
}
