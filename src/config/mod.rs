//! Monitor Configuration Module
//!
//! Per-installation configuration loaded from TOML. Every failure-mode anchor,
//! baseline and urgency cutoff used by the defect predictor is a field here,
//! with defaults matching the calibrated values.
//!
//! ## Loading Order
//!
//! 1. `TOPDRIVE_CONFIG` environment variable (path to TOML file)
//! 2. `monitor_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded config is passed explicitly to the predictors; there is no
//! process-wide instance.

mod monitor_config;
pub mod defaults;
pub mod validation;

pub use monitor_config::*;
