//! Core data models for the Attendance Valuation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance_record;
mod audit;
mod employee;
mod summary;

pub use attendance_record::{AttendanceRecord, AttendanceType, CheckDirection, CheckMethod};
pub use audit::{AuditStep, AuditWarning};
pub use employee::{Employee, Role};
pub use summary::{MonthlyReport, MonthlySummary, ValueBasis, ValuedRecord};
