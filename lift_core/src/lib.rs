#![forbid(unsafe_code)]

//! Core domain model and business logic for the lift strength engine.
//!
//! This crate provides:
//! - Domain types (exercises, logged sets, personal records, suggestions)
//! - The built-in exercise catalog and filtering
//! - One-rep-max estimation and pace helpers
//! - Deterministic workout suggestion from blueprints
//! - PR evaluation and next-load progression
//! - Persistence (JSONL set log, record book, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod estimation;
pub mod blueprint;
pub mod selector;
pub mod set_log;
pub mod records;
pub mod history;
pub mod progression;
pub mod store;
pub mod csv_export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, ExerciseFilter};
pub use config::Config;
pub use estimation::estimate_one_rep_max;
pub use selector::{day_seed, suggest_exercises_for_focus};
pub use set_log::{JsonlSetLog, SetSink};
pub use records::RecordBook;
pub use history::{InMemoryHistory, RecordStore, SetHistory};
pub use progression::{evaluate_and_record_pr_if_any, suggest_next_load};
pub use store::FileStore;
pub use csv_export::export_sets;
