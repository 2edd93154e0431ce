// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for grouped results.
//!
//! The report is a single pivoted table: one column per gateway and four
//! metric rows per case. Only the first row of a case carries its (bold)
//! label, which reads as a row span once rendered.
//!
//! ```text
//! | Case | Metric | homebrew | nginx |
//! | --- | --- | --- | --- |
//! | **small-body** | RPS | 4730.27 | 3980.10 |
//! |  | P50 (ms) | 1.10 | 1.42 |
//! |  | P90 (ms) | 2.00 | 2.31 |
//! |  | P99 (ms) | 5.00 | 6.77 |
//! ```

use crate::aggregate::ResultSet;
use crate::config::ReportOptions;
use crate::record::Metric;
use std::fmt::{self, Display};

/// Placeholder for a (case, gateway) pair without a record.
const MISSING_CELL: &str = "-";

/// Comparison table over a [`ResultSet`], rendered through [`Display`].
#[derive(Debug)]
pub struct ComparisonTable<'a> {
    results: &'a ResultSet,
    cases: Vec<&'a str>,
    gateways: Vec<&'a str>,
}

impl<'a> ComparisonTable<'a> {
    /// Lay out the table for the given results.
    pub fn new(results: &'a ResultSet, options: &ReportOptions) -> Self {
        Self {
            results,
            cases: results.cases(),
            gateways: results.gateways(options.pinned_gateway()),
        }
    }

    /// Gateway columns in display order.
    pub fn gateways(&self) -> &[&'a str] {
        &self.gateways
    }

    /// Case row blocks in display order.
    pub fn cases(&self) -> &[&'a str] {
        &self.cases
    }

    fn cell(&self, case: &str, gateway: &str, metric: Metric) -> String {
        match self.results.get(case, gateway) {
            Some(record) => format!("{:.2}", metric.value(record)),
            None => MISSING_CELL.to_string(),
        }
    }
}

impl Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = ["Case", "Metric"].into_iter().chain(self.gateways.iter().copied());
        write_row(f, header)?;
        write_row(f, std::iter::repeat("---").take(self.gateways.len() + 2))?;

        for case in &self.cases {
            for (idx, metric) in Metric::ALL.into_iter().enumerate() {
                let label = if idx == 0 {
                    format!("**{}**", case)
                } else {
                    String::new()
                };
                let cells = self
                    .gateways
                    .iter()
                    .map(|gateway| self.cell(case, gateway, metric));
                let row = [label, metric.label().to_string()].into_iter().chain(cells);
                write_row(f, row)?;
            }
        }

        Ok(())
    }
}

fn write_row<I, T>(f: &mut fmt::Formatter<'_>, cells: I) -> fmt::Result
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    f.write_str("|")?;
    for cell in cells {
        write!(f, " {} |", cell)?;
    }
    writeln!(f)
}

/// Render the comparison table as Markdown.
pub fn render_markdown(results: &ResultSet, options: &ReportOptions) -> String {
    ComparisonTable::new(results, options).to_string()
}
