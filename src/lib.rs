//! Staff Attendance Valuation Engine
//!
//! This crate turns raw check-in/check-out events and short-leave counts into
//! numeric attendance values, and aggregates them into monthly summaries and
//! reports used for payroll.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
