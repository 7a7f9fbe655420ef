//! Read-only summary table keyed by item code and period.

use std::collections::BTreeMap;

use costest_core::models::{PayItemCode, SummaryEntry, SummaryPeriod};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    entries: BTreeMap<PayItemCode, BTreeMap<SummaryPeriod, SummaryEntry>>,
}

impl SummaryTable {
    /// Index entries. The first entry for an item and period wins.
    pub fn from_entries(entries: impl IntoIterator<Item = SummaryEntry>) -> Self {
        let mut table: BTreeMap<PayItemCode, BTreeMap<SummaryPeriod, SummaryEntry>> =
            BTreeMap::new();
        for entry in entries {
            let periods = table.entry(entry.item_code.clone()).or_default();
            if periods.contains_key(&entry.period) {
                debug!(
                    item = %entry.item_code,
                    period = %entry.period,
                    "duplicate summary entry ignored"
                );
                continue;
            }
            periods.insert(entry.period, entry);
        }
        Self { entries: table }
    }

    /// Entries for `code`, most recent period first.
    pub fn entries_for(&self, code: &PayItemCode) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.get(code).into_iter().flat_map(BTreeMap::values)
    }

    pub fn get(&self, code: &PayItemCode, period: SummaryPeriod) -> Option<&SummaryEntry> {
        self.entries.get(code)?.get(&period)
    }

    /// Every entry, by item code then period.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.values().flat_map(BTreeMap::values)
    }

    /// Number of items with at least one entry.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
