use crate::query::Coverage;
use crate::status::is_active;
use crate::types::Bill;
use serde::Serialize;
use std::collections::BTreeSet;

/// Counters shown above the bill list.
///
/// Derived from the full collection, so only recomputed when the collection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub total_bills: usize,
    /// Distinct jurisdictions; always 0 for single coverage
    pub jurisdictions: usize,
    pub active_bills: usize,
    pub analyzed_bills: usize,
}

impl Statistics {
    pub fn compute(bills: &[Bill], coverage: Coverage) -> Self {
        let jurisdictions = if coverage.is_multi() {
            bills
                .iter()
                .map(Bill::state_name)
                .filter(|name| !name.is_empty())
                .collect::<BTreeSet<_>>()
                .len()
        } else {
            0
        };

        Self {
            total_bills: bills.len(),
            jurisdictions,
            active_bills: bills
                .iter()
                .filter(|b| is_active(&b.status, coverage.is_multi()))
                .count(),
            analyzed_bills: bills.iter().filter(|b| b.analysis_url().is_some()).count(),
        }
    }
}

/// State names for the jurisdiction dropdown, sorted, without the federal entry
pub fn jurisdiction_options(bills: &[Bill]) -> Vec<String> {
    bills
        .iter()
        .map(Bill::state_name)
        .filter(|name| !name.is_empty() && *name != "Federal")
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
