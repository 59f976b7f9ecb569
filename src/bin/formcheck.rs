//! # formcheck CLI
//!
//! Validates form config files and prints a report for every problem found.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use formcheck::{ConfigValidator, ToJsonSchema};

/// Validate form config files against the built-in schema.
#[derive(Parser, Debug)]
#[command(name = "formcheck", version, about, long_about = None)]
struct Cli {
    /// Print the config schema as JSON Schema and exit.
    #[arg(long)]
    print_schema: bool,

    /// Config files to validate.
    #[arg(required_unless_present = "print_schema")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` if any file failed to load or validate.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let validator = ConfigValidator::new().context("building the config schema")?;

    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&validator.schema().to_json_schema())?;
        println!("{schema}");
        return Ok(true);
    }

    let mut all_valid = true;
    for path in &cli.files {
        match check_file(&validator, path) {
            Ok(true) => println!("{}: ok", path.display()),
            Ok(false) => all_valid = false,
            Err(e) => {
                eprintln!("{}: {e:#}", path.display());
                all_valid = false;
            }
        }
    }

    Ok(all_valid)
}

fn check_file(validator: &ConfigValidator, path: &Path) -> anyhow::Result<bool> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;

    let reports = validator.aggregate(&document);
    tracing::debug!(file = %path.display(), reports = reports.len(), "validated");

    if reports.is_empty() {
        return Ok(true);
    }

    println!("{}: {} error(s)", path.display(), reports.len());
    for report in &reports {
        println!("{report}");
    }
    Ok(false)
}
