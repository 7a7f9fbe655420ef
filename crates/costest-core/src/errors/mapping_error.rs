//! Rollup mapping errors.

use super::error_code::{self, CostestErrorCode};
use super::InputError;

/// Errors raised while resolving rollup mappings.
///
/// A static conflict is a configuration-authoring bug and aborts the run
/// before any item is estimated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error(
        "static rollup mappings disagree for {replacement_code}: memo {first_memo} and memo {second_memo} list different obsolete codes"
    )]
    StaticConflict {
        replacement_code: String,
        first_memo: String,
        second_memo: String,
    },

    #[error("malformed overlay row for memo {memo_id}: {source}")]
    OverlayRow {
        memo_id: String,
        #[source]
        source: InputError,
    },
}

impl CostestErrorCode for MappingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StaticConflict { .. } => error_code::MAPPING_CONFLICT,
            Self::OverlayRow { source, .. } => source.error_code(),
        }
    }
}
