// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grouping of result records by case and gateway.

use crate::record::ResultRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Gateway moved to the first column unless configured otherwise.
pub const DEFAULT_PINNED_GATEWAY: &str = "homebrew";

/// Result records grouped as case -> gateway -> record.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    by_case: BTreeMap<String, BTreeMap<String, ResultRecord>>,
}

impl ResultSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any earlier record for the same pair.
    ///
    /// Records without a gateway or case are dropped and `false` is returned.
    pub fn insert(&mut self, record: ResultRecord) -> bool {
        if !record.is_identified() {
            return false;
        }

        self.by_case
            .entry(record.case.clone())
            .or_default()
            .insert(record.gateway.clone(), record);
        true
    }

    /// Record for a (case, gateway) pair, if one was loaded.
    pub fn get(&self, case: &str, gateway: &str) -> Option<&ResultRecord> {
        self.by_case.get(case).and_then(|gateways| gateways.get(gateway))
    }

    /// Distinct cases in ascending order.
    pub fn cases(&self) -> Vec<&str> {
        self.by_case.keys().map(String::as_str).collect()
    }

    /// Distinct gateways in ascending order, with `pinned` first when present.
    pub fn gateways(&self, pinned: Option<&str>) -> Vec<&str> {
        let distinct: BTreeSet<&str> = self
            .by_case
            .values()
            .flat_map(|gateways| gateways.keys().map(String::as_str))
            .collect();
        let mut ordered: Vec<&str> = distinct.into_iter().collect();

        if let Some(pinned) = pinned {
            if let Some(pos) = ordered.iter().position(|g| *g == pinned) {
                let gateway = ordered.remove(pos);
                ordered.insert(0, gateway);
            }
        }

        ordered
    }

    /// Number of distinct (case, gateway) pairs.
    pub fn len(&self) -> usize {
        self.by_case.values().map(BTreeMap::len).sum()
    }

    /// Whether no record has been loaded.
    pub fn is_empty(&self) -> bool {
        self.by_case.is_empty()
    }
}

impl FromIterator<ResultRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ResultRecord>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<ResultRecord> for ResultSet {
    fn extend<I: IntoIterator<Item = ResultRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
