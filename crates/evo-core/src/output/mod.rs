//! Output
//!
//! Census queries over the grid and writers for experiment results.

pub mod census;
pub mod report;

pub use census::{Census, OrganismFilter, VariantFilter};
pub use report::{ReportError, ReportFormat, ReportWriter};
