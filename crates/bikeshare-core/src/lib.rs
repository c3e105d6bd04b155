//! Core domain types for the bikeshare explorer.
//!
//! Holds the city and filter lookup tables, trip records and their derived
//! calendar fields, the error taxonomy, CLI settings and display formatting
//! shared by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
