//! Strongly-typed data model shared by the engine and its collaborators.

pub mod district;
pub mod mapping;
pub mod pay_item;
pub mod project;
pub mod record;
pub mod result;
pub mod summary;
pub mod window;

pub use district::District;
pub use mapping::{MappingDebugRow, MappingOrigin, OverlayRow, RollupMapping};
pub use pay_item::PayItemCode;
pub use project::ProjectContext;
pub use record::HistoricalRecord;
pub use result::{EstimateResult, PricedFigures, SourceTier};
pub use summary::SummaryEntry;
pub use window::{Scope, SummaryPeriod, Window};
