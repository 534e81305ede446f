//! Request types for the attendance API.
//!
//! Bodies and query strings use the same camelCase field names as the
//! persisted collections.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceType, CheckDirection, CheckMethod};

/// Request body for `POST /attendance/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEventRequest {
    /// The employee checking in or out.
    pub employee_id: String,
    /// Whether this is a check-in or a check-out.
    pub direction: CheckDirection,
    /// When the event happened. Defaults to the server's local time.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    /// How the event was captured.
    #[serde(default)]
    pub method: CheckMethod,
}

impl CheckEventRequest {
    /// Returns the event time, falling back to now.
    pub fn timestamp_or_now(&self) -> NaiveDateTime {
        self.timestamp.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Request body for `PUT /attendance/type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTypeRequest {
    /// The employee whose record is updated.
    pub employee_id: String,
    /// The record date.
    pub date: NaiveDate,
    /// The new type; `null` or absent clears it.
    #[serde(default, rename = "type")]
    pub attendance_type: Option<AttendanceType>,
}

/// Request body for `PUT /attendance/overtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOvertimeRequest {
    /// The employee whose record is updated.
    pub employee_id: String,
    /// The record date.
    pub date: NaiveDate,
    /// Overtime hours worked that day.
    pub ot_hours: Decimal,
}

/// Query string selecting a calendar month.
///
/// Either part may be omitted and defaults to the current local month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Month, 1-12.
    pub month: Option<u32>,
}

impl MonthQuery {
    /// Resolves the query to a `(year, month)` pair.
    ///
    /// Returns `None` if the month is outside 1-12.
    pub fn resolve(&self) -> Option<(i32, u32)> {
        let today = Local::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());
        (1..=12).contains(&month).then_some((year, month))
    }
}
