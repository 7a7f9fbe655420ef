//! Two-origin merge of rollup mappings.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use costest_core::errors::MappingError;
use costest_core::models::{MappingOrigin, PayItemCode, RollupMapping};
use serde::Serialize;
use tracing::{debug, info};

/// The effective rollup for one replacement code after precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMapping {
    pub replacement_code: PayItemCode,
    pub obsolete_codes: BTreeSet<PayItemCode>,
    /// Every memo that contributed to this entry, sorted.
    pub memo_ids: BTreeSet<String>,
    /// Latest effective date among the contributing memos.
    pub effective_date: Option<NaiveDate>,
    pub origin: MappingOrigin,
}

impl ResolvedMapping {
    fn seed(mapping: &RollupMapping, origin: MappingOrigin) -> Self {
        Self {
            replacement_code: mapping.replacement_code.clone(),
            obsolete_codes: obsolete_without_self(mapping),
            memo_ids: BTreeSet::from([mapping.memo_id.clone()]),
            effective_date: mapping.effective_date,
            origin,
        }
    }

    fn absorb(&mut self, mapping: &RollupMapping) {
        self.obsolete_codes.extend(obsolete_without_self(mapping));
        self.memo_ids.insert(mapping.memo_id.clone());
        self.effective_date = self.effective_date.max(mapping.effective_date);
    }

    /// Memo ids joined for notes, e.g. `25-10, 25-14`.
    pub fn memo_label(&self) -> String {
        self.memo_ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn obsolete_without_self(mapping: &RollupMapping) -> BTreeSet<PayItemCode> {
    mapping
        .obsolete_codes
        .iter()
        .filter(|code| **code != mapping.replacement_code)
        .cloned()
        .collect()
}

/// Resolved rollups keyed by replacement code.
///
/// Built once per run and shared read-only across every item estimate.
/// Serializes as a map from replacement code to its resolved entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: BTreeMap<PayItemCode, ResolvedMapping>,
}

impl MappingTable {
    pub fn get(&self, replacement_code: &PayItemCode) -> Option<&ResolvedMapping> {
        self.entries.get(replacement_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in replacement-code order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedMapping> {
        self.entries.values()
    }
}

/// Merge STATIC and OVERLAY mappings into one table.
///
/// - STATIC entries for the same replacement code must list the same
///   obsolete codes; otherwise the run fails with
///   [`MappingError::StaticConflict`].
/// - A replacement code with any STATIC entry ignores all its OVERLAY entries.
/// - OVERLAY entries for the same replacement code are unioned.
///
/// The list a mapping arrives in decides its origin.
pub fn resolve(
    static_mappings: &[RollupMapping],
    overlay_mappings: &[RollupMapping],
) -> Result<MappingTable, MappingError> {
    let mut entries: BTreeMap<PayItemCode, ResolvedMapping> = BTreeMap::new();

    for mapping in static_mappings {
        match entries.entry(mapping.replacement_code.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ResolvedMapping::seed(mapping, MappingOrigin::Static));
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.obsolete_codes != obsolete_without_self(mapping) {
                    let first_memo = existing.memo_ids.iter().next().cloned().unwrap_or_default();
                    return Err(MappingError::StaticConflict {
                        replacement_code: mapping.replacement_code.to_string(),
                        first_memo,
                        second_memo: mapping.memo_id.clone(),
                    });
                }
                existing.absorb(mapping);
            }
        }
    }

    let static_count = entries.len();
    let mut superseded = 0usize;

    for mapping in overlay_mappings {
        match entries.entry(mapping.replacement_code.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ResolvedMapping::seed(mapping, MappingOrigin::Overlay));
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.origin == MappingOrigin::Static {
                    superseded += 1;
                    debug!(
                        replacement = %mapping.replacement_code,
                        memo = %mapping.memo_id,
                        "overlay mapping superseded by static mapping"
                    );
                    continue;
                }
                existing.absorb(mapping);
            }
        }
    }

    info!(
        static_entries = static_count,
        overlay_entries = entries.len() - static_count,
        superseded,
        "rollup mappings resolved"
    );

    Ok(MappingTable { entries })
}
