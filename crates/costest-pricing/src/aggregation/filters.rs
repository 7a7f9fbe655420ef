//! Scope, horizon, and quantity-band filters.

use costest_core::models::{HistoricalRecord, ProjectContext, Scope, Window};
use serde::Serialize;

/// Whether `record` belongs to `window` for this project.
///
/// District windows only match records from the project's own region; a
/// project without a regional district matches no district window.
pub fn in_window(record: &HistoricalRecord, window: Window, project: &ProjectContext) -> bool {
    let in_scope = match window.scope {
        Scope::District => project.regional_district() == Some(record.district),
        Scope::State => true,
    };
    in_scope && window.contains(record.bid_date, project.as_of)
}

/// How the quantity band treated a window's records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BandStatus {
    /// No target quantity for the item.
    NotApplied,
    /// Kept quantities within `[lower, upper]`.
    Applied { lower: f64, upper: f64 },
    /// The band would have emptied the window; the unfiltered set was kept.
    Relaxed,
}

/// Keep records whose quantity lies within `[qty_lower, qty_upper] × target`.
pub fn quantity_band<'a>(
    records: Vec<&'a HistoricalRecord>,
    target_quantity: Option<f64>,
    qty_lower: f64,
    qty_upper: f64,
    relax_when_empty: bool,
) -> (Vec<&'a HistoricalRecord>, BandStatus) {
    let Some(target) = target_quantity else {
        return (records, BandStatus::NotApplied);
    };
    let lower = qty_lower * target;
    let upper = qty_upper * target;

    let banded: Vec<&HistoricalRecord> = records
        .iter()
        .copied()
        .filter(|r| r.quantity >= lower && r.quantity <= upper)
        .collect();

    if banded.is_empty() && !records.is_empty() && relax_when_empty {
        return (records, BandStatus::Relaxed);
    }
    (banded, BandStatus::Applied { lower, upper })
}
