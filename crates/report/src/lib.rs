// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Post-processing of gateway load-test results.
//!
//! The crate covers two stages that communicate only through files:
//!
//! 1. **Extraction**: a `wrk --latency` text report is parsed into a
//!    [`ResultRecord`] for one (gateway, case) pair and stored as JSON.
//! 2. **Aggregation**: every record in a results directory is grouped into
//!    a [`ResultSet`] and rendered as a Markdown comparison table.
//!
//! # Quick Start
//!
//! ```no_run
//! use gwbench_report::{aggregate_dir, extract_to_json, ReportOptions};
//!
//! // One run per (gateway, case)
//! let (record, path) = extract_to_json("results/homebrew_small.txt", "homebrew", "small", None)?;
//! println!("{} -> {}", record.gateway, path.display());
//!
//! // Once over the whole directory
//! let markdown = aggregate_dir("results", &ReportOptions::default())?;
//! print!("{}", markdown);
//! # Ok::<(), gwbench_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`record`] - The `ResultRecord` type and table metrics
//! - [`extract`] - wrk report parsing
//! - [`aggregate`] - Grouping by case and gateway
//! - [`markdown`] - Markdown table rendering
//! - [`io`] - Reading and writing reports, records, and directories
//! - [`config`] - Rendering options

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod markdown;
pub mod record;

pub use aggregate::{ResultSet, DEFAULT_PINNED_GATEWAY};
pub use config::ReportOptions;
pub use error::{ReportError, Result};
pub use extract::{parse_duration_ms, parse_report};
pub use markdown::{render_markdown, ComparisonTable};
pub use record::{Latency, Metric, ResultRecord};

use std::path::{Path, PathBuf};

/// Extract a report and persist the record as JSON.
///
/// The record is written to `output`, or next to the report when `output`
/// is `None` (see [`io::json_path_for`]). Nothing is written when reading
/// the report fails.
///
/// # Returns
///
/// The extracted record and the path it was written to.
pub fn extract_to_json(
    report: impl AsRef<Path>,
    gateway: &str,
    case: &str,
    output: Option<&Path>,
) -> Result<(ResultRecord, PathBuf)> {
    let report = report.as_ref();
    let record = io::extract_file(report, gateway, case)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| io::json_path_for(report));
    io::write_record(&record, &path)?;
    Ok((record, path))
}

/// Load a results directory and render its Markdown comparison table.
///
/// Unreadable or malformed files are logged and left out of the table.
pub fn aggregate_dir(dir: impl AsRef<Path>, options: &ReportOptions) -> Result<String> {
    let results = io::load_results(dir)?;
    Ok(render_markdown(&results, options))
}
