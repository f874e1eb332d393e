//! Shared data types for the patch evolution simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces these values and every reporting consumer reads them.

pub mod report;
pub mod snapshot;
pub mod variant;
pub mod zone;

// Re-export zone types
pub use zone::{Zone, HIGH_THRESHOLD, MEDIUM_THRESHOLD};

// Re-export variant types
pub use variant::Variant;

// Re-export report types
pub use report::{GenerationReport, TickSummary, ZoneCounts, CSV_HEADER};

// Re-export snapshot types
pub use snapshot::{GridSnapshot, OrganismSnapshot, PatchSnapshot};
