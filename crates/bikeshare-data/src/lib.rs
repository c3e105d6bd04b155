//! Data layer for the bikeshare explorer.
//!
//! Locates and reads city CSV files, applies month/day filters, and runs
//! the statistics passes that feed the report.

pub mod aggregator;
pub mod analysis;
pub mod analyzer;
pub mod filter;
pub mod reader;

pub use bikeshare_core as core;
