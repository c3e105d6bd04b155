//! Console front end for the bikeshare explorer.
//!
//! Line-oriented prompts, the filter selector, the plain-text statistics
//! report, the raw data browser and the session loop tying them together.

pub mod app;
pub mod browser;
pub mod console;
pub mod filter_selector;
pub mod report;
pub mod table_view;

pub use bikeshare_core as core;
