#![forbid(unsafe_code)]

//! Core domain model and pipeline for fitlog.
//!
//! This crate provides:
//! - Domain types (reference rows, step/workout/food/water records)
//! - Reference table loading
//! - The recorder and its owned tables
//! - A randomized simulator driving the recorder
//! - Per-user CSV export, console reports and the combined SVG chart

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod reference;
pub mod tables;
pub mod recorder;
pub mod simulator;
pub mod export;
pub mod report;
pub mod chart;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use reference::{ReferenceRow, ReferenceTable, References};
pub use tables::{FitnessTables, UserTables};
pub use recorder::{LookupPolicy, Recorder};
pub use simulator::{SimulationSummary, Simulator};
pub use export::{export_all, load_user_export, user_dir};
