//! Reference data: town range tables and facility addresses.
//!
//! Loaded once at startup (from the built-in dataset or a JSON file) and
//! read-only afterwards.

mod data;
mod error;
mod table;

pub use data::{ReferenceData, ReferenceDataBuilder};
pub use error::DataError;
pub use table::{CatchAll, CoverageIssue, FacilityRecord, Range, TownRangeEntry};
