// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for report extraction and aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, parsing, or writing results.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The raw wrk report could not be read.
    #[error("failed to read report {path}")]
    ReadReport {
        /// Path of the report.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A result record file could not be opened or read.
    #[error("failed to read result file {path}")]
    ReadRecord {
        /// Path of the record file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A result record file does not hold a valid record.
    #[error("invalid result file {path}")]
    ParseRecord {
        /// Path of the record file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize result record")]
    Serialize(#[from] serde_json::Error),

    /// An output file could not be written.
    #[error("failed to write {path}")]
    WriteOutput {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The results directory could not be listed.
    #[error("failed to list results directory {path}")]
    ReadDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
