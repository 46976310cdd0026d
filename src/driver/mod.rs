//! Console driver: configuration and the batch run.
//!
//! Not part of the puzzle core; calls it once per trial and reports.

pub mod batch;
pub mod config;

pub use batch::{report_trial, run, run_batch, BatchSummary, DriverError};
pub use config::{ConfigError, DriverConfig, OutputFormat};
