//! CLI tool for checking legacy redirect feeds.
//!
//! Runs the same loader and decision logic as the server, without starting
//! one, so a feed can be validated before it is deployed.
//!
//! # Usage
//!
//! ```bash
//! # Validate a feed and list cyclic or overlong chains
//! cargo run --bin redirects -- check data/redirects.csv
//!
//! # Fail (exit code 1) when any chain is unsafe
//! cargo run --bin redirects -- check data/redirects.csv --strict
//!
//! # Show what the middleware would do for some paths
//! cargo run --bin redirects -- resolve data/redirects.csv "/Old-Shop/?ref=mail" /about-us
//! ```

use legacy_redirects::domain::{Decision, LoadReport, RedirectTable, decide};
use legacy_redirects::infrastructure::feed::CsvFileFeed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI tool for legacy redirect feeds.
#[derive(Parser)]
#[command(name = "redirects")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a feed and report skipped rows and unsafe chains
    Check {
        /// CSV feed file
        file: PathBuf,

        /// Exit with an error when an unsafe chain is found
        #[arg(long)]
        strict: bool,
    },

    /// Print the redirect decision for one or more raw paths
    Resolve {
        /// CSV feed file
        file: PathBuf,

        /// Raw request paths, optionally with a query string
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, strict } => check(&file, strict),
        Commands::Resolve { file, paths } => {
            resolve(&file, &paths)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(file: &Path) -> Result<(RedirectTable, LoadReport)> {
    if !file.exists() {
        anyhow::bail!("Feed file {} does not exist", file.display());
    }

    CsvFileFeed::new(file)
        .load_blocking()
        .with_context(|| format!("Failed to load {}", file.display()))
}

/// Prints the load report and audit findings.
fn check(file: &Path, strict: bool) -> Result<ExitCode> {
    let (table, report) = load(file)?;

    println!("{}", "Redirect feed check".bright_blue().bold());
    println!("  File:     {}", file.display().to_string().cyan());
    println!("  Accepted: {}", report.accepted.to_string().green());
    println!("  Entries:  {}", table.len());
    if report.duplicates > 0 {
        println!(
            "  Duplicates (last row wins): {}",
            report.duplicates.to_string().yellow()
        );
    }
    println!();

    println!("{}", "Skipped rows:".bright_white().bold());
    print_skip("missing column", report.skipped_missing_column);
    print_skip("empty source", report.skipped_empty_key);
    print_skip("invalid target", report.skipped_invalid_target);
    print_skip("self-redirect", report.skipped_self_redirect);
    println!();

    let findings = table.audit();
    if findings.is_empty() {
        println!("{}", "All chains resolve to a final target".green().bold());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{}",
        format!("{} unsafe chain(s), these redirect one hop only:", findings.len())
            .yellow()
            .bold()
    );
    for finding in &findings {
        let target = table.get(&finding.key).unwrap_or("-");
        println!(
            "  {} {} {} [{}]",
            finding.key.cyan(),
            "→".dimmed(),
            target,
            finding.resolution.label().red()
        );
    }

    if strict {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_skip(label: &str, count: usize) {
    let count = if count > 0 {
        count.to_string().yellow()
    } else {
        count.to_string().dimmed()
    };
    println!("  {:<16}{}", label, count);
}

/// Prints the decision for each path.
fn resolve(file: &Path, paths: &[String]) -> Result<()> {
    let (table, _) = load(file)?;

    for path in paths {
        match decide(&table, path) {
            Decision::Redirect {
                location,
                resolution,
            } => {
                let note = if resolution.is_safe() {
                    String::new()
                } else {
                    format!(" ({}, first hop only)", resolution.label())
                        .red()
                        .to_string()
                };
                println!(
                    "{} {} {}{}",
                    path.cyan(),
                    "301 →".green().bold(),
                    location,
                    note
                );
            }
            Decision::Continue(reason) => {
                println!(
                    "{} {} ({})",
                    path.cyan(),
                    "continue".dimmed(),
                    reason.label()
                );
            }
        }
    }

    Ok(())
}
