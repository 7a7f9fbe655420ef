//! Design memo rollup mappings.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PayItemCode;

/// Where a rollup mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingOrigin {
    /// Bundled, trusted configuration.
    Static,
    /// Externally supplied mapping file.
    Overlay,
}

impl MappingOrigin {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "STATIC",
            Self::Overlay => "OVERLAY",
        }
    }
}

impl fmt::Display for MappingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A design memo's replacement of obsolete pay items by a new code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupMapping {
    pub memo_id: String,
    pub effective_date: Option<NaiveDate>,
    pub replacement_code: PayItemCode,
    pub obsolete_codes: BTreeSet<PayItemCode>,
    pub origin: MappingOrigin,
}

impl RollupMapping {
    pub fn new(
        memo_id: impl Into<String>,
        effective_date: Option<NaiveDate>,
        replacement_code: PayItemCode,
        obsolete_codes: impl IntoIterator<Item = PayItemCode>,
        origin: MappingOrigin,
    ) -> Self {
        Self {
            memo_id: memo_id.into(),
            effective_date,
            replacement_code,
            obsolete_codes: obsolete_codes.into_iter().collect(),
            origin,
        }
    }
}

/// One row of the overlay mapping file:
/// `memo_id,effective_date,replacement_code,obsolete_code`.
///
/// Values are kept as read; validation happens when rows are grouped into
/// [`RollupMapping`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayRow {
    pub memo_id: String,
    pub effective_date: String,
    pub replacement_code: String,
    pub obsolete_code: String,
}

/// Audit row describing how a rolled-up item was mapped.
/// Emitted only for items priced by the rollup tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingDebugRow {
    /// Obsolete code whose history was pooled.
    pub source_item: String,
    /// Replacement code being priced.
    pub mapped_item: String,
    /// e.g. `DM 25-10`.
    pub mapping_rule: String,
    pub adder_applied: bool,
    /// Free-text evidence: records contributed, window, origin.
    pub evidence: String,
}
