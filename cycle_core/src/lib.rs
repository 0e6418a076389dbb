#![forbid(unsafe_code)]

//! Cycle and pregnancy prediction engine.
//!
//! This crate provides:
//! - Domain types (period records, predictions, milestones, symptom logs)
//! - Cycle prediction (average length, next period, ovulation, fertile window)
//! - Gestation mapping (week, trimester, progress, development milestone)
//!   and weight change across weekly pregnancy updates
//! - Symptom log summaries
//! - History loaders and configuration for callers
//!
//! The prediction functions are pure: they take plain data, perform no I/O
//! and report missing data as `None` rather than as errors.

pub mod types;
pub mod error;
pub mod cycle;
pub mod milestones;
pub mod gestation;
pub mod symptoms;
pub mod history;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use cycle::{
    average_cycle_length, fertile_window, is_date_in_period, predict_next_period,
    predict_ovulation, CycleParams,
};
pub use gestation::{current_week, milestone_for, progress_percent, trimester, weight_change};
pub use milestones::{default_milestones, MilestoneTable};
pub use history::{load_periods, load_pregnancy_updates, load_symptom_logs};
