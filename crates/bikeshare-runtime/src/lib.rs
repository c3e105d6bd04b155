//! Runtime orchestration layer for the bikeshare explorer.
//!
//! Resolves the data directory into per-cycle datasets and runs the
//! statistics pipeline over them for the UI layer.

pub mod data_manager;
pub mod orchestrator;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
