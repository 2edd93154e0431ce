// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for gwbench.
//!
//! This crate provides the `gwbench` command with two subcommands:
//! `parse` turns one wrk report into a JSON result record, and `aggregate`
//! renders a results directory as a Markdown comparison table.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use clap::{Parser, Subcommand, ValueEnum};
use gwbench_report::{aggregate_dir, extract_to_json, io, ReportOptions, DEFAULT_PINNED_GATEWAY};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// gwbench CLI.
#[derive(Parser, Debug)]
#[command(name = "gwbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr.
    #[arg(long, value_enum, global = true, env = "GWBENCH_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Log output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a result record from a wrk report.
    ///
    /// The record is written as JSON next to the report (`.txt` replaced by
    /// `.json`) and printed to stdout.
    Parse {
        /// wrk text report.
        report: PathBuf,

        /// Gateway under test.
        gateway: String,

        /// Test case name.
        case: String,

        /// Write the JSON record here instead of next to the report.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every result record in a directory as a Markdown table.
    Aggregate {
        /// Directory holding `*.json` result records.
        results_dir: PathBuf,

        /// Also write the Markdown table to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Gateway shown in the first column when present.
        #[arg(long, env = "GWBENCH_PIN_GATEWAY", default_value = DEFAULT_PINNED_GATEWAY)]
        pin_gateway: String,

        /// Keep plain alphabetical gateway order.
        #[arg(long)]
        no_pin: bool,
    },
}

/// Parse command-line arguments.
///
/// Usage errors print to stderr and exit with status 1; `--help` and
/// `--version` exit with status 0.
pub fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        // Printing can only fail on a closed stream; the exit code still applies.
        let _ = err.print();
        std::process::exit(code)
    })
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` sets the filter, defaulting to `warn`; `--verbose` forces
/// `debug`.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi(&std::io::stderr()))
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Whether log output to `stream` should carry ANSI colour codes.
fn use_ansi(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let cli = parse_args();
    init_tracing(cli.verbose, cli.log_format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Execute a parsed command, writing its primary output to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Parse {
            report,
            gateway,
            case,
            output,
        } => {
            let (record, path) = extract_to_json(&report, &gateway, &case, output.as_deref())?;
            info!(path = %path.display(), gateway = %gateway, case = %case, "wrote result record");

            let json = io::record_to_json(&record)?;
            writeln!(out, "{}", json)?;
            Ok(())
        }
        Commands::Aggregate {
            results_dir,
            output,
            pin_gateway,
            no_pin,
        } => {
            let options = if no_pin {
                ReportOptions::unpinned()
            } else {
                ReportOptions::pinned(pin_gateway)
            };

            let markdown = aggregate_dir(&results_dir, &options)?;
            out.write_all(markdown.as_bytes())?;

            if let Some(path) = output {
                io::write_output(&path, &markdown)?;
                info!(path = %path.display(), "wrote markdown report");
            }

            Ok(())
        }
    }
}
