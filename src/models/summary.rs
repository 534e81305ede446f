//! Monthly summary and report models.
//!
//! These types are derived on every request from attendance records and the
//! rule set; none of them is persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, AuditStep, AuditWarning, Employee};

/// Which branch of the valuation rules produced a record's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBasis {
    /// Typed as a full day.
    FullDay,
    /// Typed as a half day.
    HalfDay,
    /// Short leave while the month's count is within quota.
    ShortLeaveWithinQuota,
    /// Short leave while the month's count exceeds quota.
    ShortLeaveOverQuota,
    /// Untyped, at least the full-day hour threshold.
    HoursFullDay,
    /// Untyped, at least the half-day hour threshold.
    HoursHalfDay,
    /// Untyped and under the half-day threshold.
    NoCredit,
}

/// Aggregated attendance for one employee over one calendar month.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthlySummary;
///
/// let summary = MonthlySummary::default();
/// assert_eq!(summary.working_days, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Records valued at exactly 1 that are not short leaves.
    pub full_days: u32,
    /// Records valued at exactly 0.5 that are not short leaves.
    pub half_days: u32,
    /// Records typed as short leave.
    pub short_leaves: u32,
    /// Sum of overtime hours.
    pub total_ot: Decimal,
    /// Sum of attendance values.
    pub total_value: Decimal,
    /// Number of records in the month, whatever their value.
    pub working_days: u32,
}

/// A record together with its computed attendance value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedRecord {
    /// The stored record.
    pub record: AttendanceRecord,
    /// The computed attendance value.
    pub attendance_value: Decimal,
    /// The rule branch that produced the value.
    pub basis: ValueBasis,
}

/// Everything a report exporter needs to render one employee's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// The employee the report is for.
    pub employee: Employee,
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// English month name (e.g. "March").
    pub month_name: String,
    /// The month's records in date order, with values.
    pub records: Vec<ValuedRecord>,
    /// The aggregated summary.
    pub summary: MonthlySummary,
    /// Whether overtime columns should be shown.
    pub show_overtime: bool,
    /// Per-record valuation decisions.
    pub audit_steps: Vec<AuditStep>,
    /// Data issues noticed while valuing the month.
    pub warnings: Vec<AuditWarning>,
}
