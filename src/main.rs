//! `license-headers` — report source files that are missing a required license header.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the logger.
//! 2. Load the config and merge CLI overrides.
//! 3. Walk the tree and check every candidate.
//! 4. Render the requested report.
//! 5. Exit `0`, `1` (missing headers with `--fail-on-missing`) or `2` (error).

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cli::{Cli, ReportFormat};
use license_headers::config::{load_config, Overrides};
use license_headers::{auditor, logging, report, UnreadablePolicy};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    report::terminal::init_colors();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(&cli.path, cli.config.as_deref())?;
    let settings = config.resolve(&Overrides {
        extension: cli.ext.as_deref(),
        template: cli.template.as_deref(),
        on_unreadable: cli.on_unreadable.as_ref().map(UnreadablePolicy::from),
        exclude: &cli.exclude,
        fail_on_missing: cli.fail_on_missing,
    })?;

    let spinner = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")?,
        );
        pb
    };

    let result = auditor::audit_with(&cli.path, &settings.options, |path| {
        spinner.inc(1);
        spinner.set_message(path.display().to_string());
    });
    spinner.finish_and_clear();

    let audit_report = result.with_context(|| format!("audit of {} failed", cli.path.display()))?;

    info!(
        scanned = audit_report.scanned,
        missing = audit_report.violations.len(),
        skipped = audit_report.skipped.len(),
        "audit finished"
    );

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&audit_report, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&audit_report)?),
    }

    if settings.fail_on_missing && !audit_report.is_clean() {
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}
