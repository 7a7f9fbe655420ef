//! In-memory index of screened historical records.

use std::collections::{BTreeMap, BTreeSet};

use costest_core::errors::InputError;
use costest_core::models::{HistoricalRecord, PayItemCode};
use tracing::warn;

/// Historical records grouped by item code.
///
/// Only records passing [`HistoricalRecord::validate`] are admitted. Within a
/// code, records are ordered by bid date then contract id so statistics do
/// not depend on the order the caller supplied them in.
#[derive(Debug, Clone, Default)]
pub struct HistoricalPool {
    by_code: BTreeMap<PayItemCode, Vec<HistoricalRecord>>,
    len: usize,
}

impl HistoricalPool {
    /// Screen and index records. Malformed records are logged, excluded, and
    /// returned so the caller can report them.
    pub fn from_records(
        records: impl IntoIterator<Item = HistoricalRecord>,
    ) -> (Self, Vec<InputError>) {
        let mut by_code: BTreeMap<PayItemCode, Vec<HistoricalRecord>> = BTreeMap::new();
        let mut rejected = Vec::new();
        let mut len = 0usize;

        for record in records {
            if let Err(e) = record.validate() {
                warn!(
                    item = %record.item_code,
                    contract = %record.contract_id,
                    error = %e,
                    "excluding malformed historical record"
                );
                rejected.push(e);
                continue;
            }
            by_code.entry(record.item_code.clone()).or_default().push(record);
            len += 1;
        }

        for records in by_code.values_mut() {
            records.sort_by(|a, b| {
                a.bid_date
                    .cmp(&b.bid_date)
                    .then_with(|| a.contract_id.cmp(&b.contract_id))
            });
        }

        (Self { by_code, len }, rejected)
    }

    /// Records for any of `codes`, grouped by code in code order.
    pub fn records_for<'a>(
        &'a self,
        codes: &'a BTreeSet<PayItemCode>,
    ) -> impl Iterator<Item = &'a HistoricalRecord> + 'a {
        codes
            .iter()
            .filter_map(|code| self.by_code.get(code))
            .flatten()
    }

    pub fn has_code(&self, code: &PayItemCode) -> bool {
        self.by_code.contains_key(code)
    }

    /// Number of admitted records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
