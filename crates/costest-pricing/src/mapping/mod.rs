//! Mapping Resolver: merges the bundled (STATIC) and overlay rollup mappings
//! into one read-only table keyed by replacement code.
//!
//! Precedence is per replacement code: a STATIC mapping replaces every
//! OVERLAY mapping for the same code wholesale. Obsolete-code sets are never
//! merged across origins.

pub mod overlay;
pub mod resolver;

pub use overlay::group_overlay_rows;
pub use resolver::{resolve, MappingTable, ResolvedMapping};
