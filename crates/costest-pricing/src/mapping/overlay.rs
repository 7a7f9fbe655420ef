//! Grouping of overlay mapping rows into rollup mappings.
//!
//! The overlay file carries one row per obsolete code
//! (`memo_id,effective_date,replacement_code,obsolete_code`). Rows sharing a
//! memo id and replacement code collapse into a single OVERLAY mapping.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use costest_core::errors::{InputError, MappingError};
use costest_core::models::{MappingOrigin, OverlayRow, PayItemCode, RollupMapping};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

struct Group {
    effective_date: Option<NaiveDate>,
    obsolete_codes: BTreeSet<PayItemCode>,
}

/// Group overlay rows into OVERLAY [`RollupMapping`]s.
///
/// Malformed rows (bad codes, bad dates) are excluded and returned alongside
/// the mappings built from the remaining rows. Output is ordered by memo id,
/// then replacement code.
pub fn group_overlay_rows(rows: &[OverlayRow]) -> (Vec<RollupMapping>, Vec<MappingError>) {
    let mut groups: BTreeMap<(String, PayItemCode), Group> = BTreeMap::new();
    let mut errors = Vec::new();

    for row in rows {
        let memo_id = row.memo_id.trim().to_string();
        match parse_row(row) {
            Ok((effective_date, replacement, obsolete)) => {
                let group = groups.entry((memo_id, replacement)).or_insert(Group {
                    effective_date,
                    obsolete_codes: BTreeSet::new(),
                });
                group.effective_date = group.effective_date.max(effective_date);
                group.obsolete_codes.insert(obsolete);
            }
            Err(source) => {
                warn!(memo = %memo_id, error = %source, "skipping malformed overlay row");
                errors.push(MappingError::OverlayRow { memo_id, source });
            }
        }
    }

    let mappings = groups
        .into_iter()
        .map(|((memo_id, replacement), group)| {
            RollupMapping::new(
                memo_id,
                group.effective_date,
                replacement,
                group.obsolete_codes,
                MappingOrigin::Overlay,
            )
        })
        .collect();

    (mappings, errors)
}

fn parse_row(
    row: &OverlayRow,
) -> Result<(Option<NaiveDate>, PayItemCode, PayItemCode), InputError> {
    let effective_date = parse_date(&row.effective_date)?;
    let replacement = PayItemCode::parse(&row.replacement_code)?;
    let obsolete = PayItemCode::parse(&row.obsolete_code)?;
    Ok((effective_date, replacement, obsolete))
}

/// Blank dates are allowed; anything else must be `YYYY-MM-DD`.
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| InputError::InvalidDate {
            raw: raw.to_string(),
        })
}
