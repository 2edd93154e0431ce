// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result record types.
//!
//! A [`ResultRecord`] is the parsed outcome of one wrk report for one
//! (gateway, case) pair. It is persisted as JSON by the extractor and read
//! back by the aggregator.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Parsed benchmark result for a single gateway under a single case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// System under test.
    #[serde(default, deserialize_with = "null_as_default")]
    pub gateway: String,
    /// Test scenario.
    #[serde(default, deserialize_with = "null_as_default")]
    pub case: String,
    /// Requests per second.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rps: f64,
    /// Latency percentiles in milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub latency: Latency,
}

impl ResultRecord {
    /// Create an empty record for the given labels.
    pub fn new(gateway: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
            case: case.into(),
            rps: 0.0,
            latency: Latency::default(),
        }
    }

    /// Whether both identifying labels are present.
    pub fn is_identified(&self) -> bool {
        !self.gateway.is_empty() && !self.case.is_empty()
    }
}

/// Latency percentiles in milliseconds.
///
/// Percentiles missing from the source report stay `None` and are left out
/// of the serialized JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Latency {
    /// Median latency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    /// 90th percentile latency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p90: Option<f64>,
    /// 99th percentile latency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p99: Option<f64>,
}

impl Latency {
    /// Whether no percentile has been recorded.
    pub fn is_empty(&self) -> bool {
        self.p50.is_none() && self.p90.is_none() && self.p99.is_none()
    }
}

/// Metric rendered in the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Requests per second.
    Rps,
    /// Median latency.
    P50,
    /// 90th percentile latency.
    P90,
    /// 99th percentile latency.
    P99,
}

impl Metric {
    /// All metrics in table order.
    pub const ALL: [Metric; 4] = [Metric::Rps, Metric::P50, Metric::P90, Metric::P99];

    /// Row label used in the Markdown table.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Rps => "RPS",
            Metric::P50 => "P50 (ms)",
            Metric::P90 => "P90 (ms)",
            Metric::P99 => "P99 (ms)",
        }
    }

    /// Read this metric from a record, `0.0` when the value is absent.
    pub fn value(self, record: &ResultRecord) -> f64 {
        match self {
            Metric::Rps => record.rps,
            Metric::P50 => record.latency.p50.unwrap_or(0.0),
            Metric::P90 => record.latency.p90.unwrap_or(0.0),
            Metric::P99 => record.latency.p99.unwrap_or(0.0),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
