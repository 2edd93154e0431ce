// Copyright 2025 gwbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report rendering options.

use crate::aggregate::DEFAULT_PINNED_GATEWAY;

/// Options controlling how the comparison table is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Gateway forced into the first column when present.
    pub pinned_gateway: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            pinned_gateway: Some(DEFAULT_PINNED_GATEWAY.to_string()),
        }
    }
}

impl ReportOptions {
    /// Options with the given pinned gateway.
    pub fn pinned(gateway: impl Into<String>) -> Self {
        Self {
            pinned_gateway: Some(gateway.into()),
        }
    }

    /// Options that keep plain lexicographic gateway order.
    pub fn unpinned() -> Self {
        Self {
            pinned_gateway: None,
        }
    }

    pub(crate) fn pinned_gateway(&self) -> Option<&str> {
        self.pinned_gateway.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pins_homebrew() {
        assert_eq!(ReportOptions::default().pinned_gateway(), Some("homebrew"));
    }

    #[test]
    fn test_unpinned() {
        assert_eq!(ReportOptions::unpinned().pinned_gateway(), None);
        assert_eq!(ReportOptions::pinned("envoy").pinned_gateway(), Some("envoy"));
    }
}
