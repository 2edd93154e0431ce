// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Extraction of result records from wrk text reports.
//!
//! Only the summary throughput line and the `--latency` distribution block
//! are read:
//!
//! ```text
//!   Latency Distribution
//!      50%    1.10ms
//!      90%    2.00ms
//!      99%    5.00ms
//! Requests/sec:   4730.27
//! ```

use crate::record::{Latency, ResultRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static RPS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Requests/sec:\s+(\d+\.?\d*)").expect("valid requests/sec pattern")
});

/// Percentile prefixes recognized in the latency distribution.
const PERCENTILE_PREFIXES: [(&str, Percentile); 3] = [
    ("50%", Percentile::P50),
    ("90%", Percentile::P90),
    ("99%", Percentile::P99),
];

#[derive(Debug, Clone, Copy)]
enum Percentile {
    P50,
    P90,
    P99,
}

impl Percentile {
    fn slot(self, latency: &mut Latency) -> &mut Option<f64> {
        match self {
            Percentile::P50 => &mut latency.p50,
            Percentile::P90 => &mut latency.p90,
            Percentile::P99 => &mut latency.p99,
        }
    }
}

/// Parse a wrk report into a result record for the given labels.
///
/// `rps` falls back to `0.0` when no `Requests/sec:` line exists. A
/// percentile that appears on several lines keeps the last value.
pub fn parse_report(content: &str, gateway: &str, case: &str) -> ResultRecord {
    let mut record = ResultRecord::new(gateway, case);

    if let Some(rps) = RPS_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|rps| rps.is_finite())
    {
        record.rps = rps;
    }

    for line in content.lines() {
        let trimmed = line.trim();
        let Some(percentile) = PERCENTILE_PREFIXES
            .iter()
            .find(|(prefix, _)| trimmed.starts_with(prefix))
            .map(|(_, percentile)| *percentile)
        else {
            continue;
        };

        if let Some(token) = trimmed.split_whitespace().nth(1) {
            *percentile.slot(&mut record.latency) = Some(parse_duration_ms(token));
        }
    }

    record
}

/// Convert a wrk duration token (`1.10ms`, `2.00s`, `500us`) to milliseconds.
///
/// Unknown suffixes, unparseable numbers, and non-finite values (`nan`,
/// `inf`) yield `0.0`.
pub fn parse_duration_ms(value: &str) -> f64 {
    // Two-character suffixes first, otherwise "ms" would match "s".
    let parsed = if let Some(number) = value.strip_suffix("ms") {
        number.parse::<f64>().ok()
    } else if let Some(number) = value.strip_suffix("us") {
        number.parse::<f64>().ok().map(|us| us / 1000.0)
    } else if let Some(number) = value.strip_suffix('s') {
        number.parse::<f64>().ok().map(|s| s * 1000.0)
    } else {
        None
    };

    parsed.filter(|ms| ms.is_finite()).unwrap_or(0.0)
}
