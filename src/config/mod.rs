//! Configuration loading and management for the Attendance Valuation Engine.
//!
//! This module provides functionality to load the attendance rule set and the
//! roles catalog from YAML files, with documented defaults for every field.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Half day value: {}", config.rules().half_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceRules, AttendanceSettings, FALLBACK_SHORT_LEAVE_QUOTA, RoleSetting,
    ShortLeaveThresholds,
};
