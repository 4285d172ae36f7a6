//! `attrsim`: find near-duplicate attribute names and explain how they differ.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialize logging.
//! 2. Load config ([`config::load_config`]).
//! 3. Validate the threshold from `--threshold` or config; an invalid value
//!    aborts before any work.
//! 4. Read the attribute column ([`input`]) and keep distinct non-blank
//!    values. Without a threshold so far, prompt for one ([`prompt`]).
//! 5. Score every pair and merge linked attributes into groups
//!    ([`similarity::grouping`]).
//! 6. Render the requested report ([`report`]).

mod cli;
mod config;
mod error;
mod input;
mod models;
mod prompt;
mod report;
mod similarity;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use input::{detect_format, distinct_values, reader_for, ColumnSelector, ReaderOptions};
use models::{SimilarityGroup, Threshold};
use report::terminal::RenderOptions;
use similarity::grouping::{group, group_with_progress};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    // A threshold given up front is validated before any input is read
    let preset_threshold = match &cli.threshold {
        Some(raw) => Some(raw.parse::<Threshold>()?),
        None => config.threshold()?,
    };

    // Read attribute column
    let format = detect_format(&cli.input);
    let options = ReaderOptions {
        column: cli
            .column
            .as_deref()
            .or(config.input.column.as_deref())
            .map(ColumnSelector::parse)
            .unwrap_or_default(),
        has_headers: !cli.no_headers && config.input.has_headers,
        delimiter: match cli.delimiter {
            Some(c) if c.is_ascii() => Some(c as u8),
            Some(c) => anyhow::bail!("Invalid delimiter `{}`: must be an ASCII character", c),
            None => config.delimiter()?,
        },
    };

    let cells = reader_for(format, &options).read(&cli.input)?;
    let attributes = distinct_values(&cells);

    if !cli.quiet {
        eprintln!(
            "  {} {} {} rows, {} distinct attributes",
            "→".cyan(),
            format,
            cells.len(),
            attributes.len()
        );
    }

    let threshold = match preset_threshold {
        Some(threshold) => threshold,
        None => prompt::prompt_threshold()?,
    };
    info!(%threshold, attributes = attributes.len(), "grouping attributes");

    let groups = if cli.quiet {
        group(&attributes, threshold)
    } else {
        group_with_progress_bar(&attributes, threshold)?
    };

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &groups,
                &cli.input,
                threshold,
                attributes.len(),
                RenderOptions {
                    verbose: cli.verbose,
                    quiet: cli.quiet,
                    show_bridges: cli.show_bridges,
                },
            )?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        ReportFormat::Csv => {
            let path = match cli.output {
                Some(path) => path,
                None => {
                    let dir = config.report.output_dir.clone().unwrap_or_else(|| cwd.clone());
                    report::unique_path(&report::default_report_path(
                        &dir,
                        &cli.input,
                        threshold,
                    ))
                }
            };
            report::csv::write(&groups, &path)?;
            if !cli.quiet {
                eprintln!(
                    "  {} {} groups written to {}",
                    "✓".green(),
                    groups.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "attrsim=debug" } else { "attrsim=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn group_with_progress_bar(
    attributes: &[String],
    threshold: Threshold,
) -> Result<Vec<SimilarityGroup>> {
    let pb = ProgressBar::new(attributes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("comparing");

    let groups = group_with_progress(attributes, threshold, |row| pb.set_position(row as u64));

    pb.finish_and_clear();
    Ok(groups)
}
