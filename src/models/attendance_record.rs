//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] stored per employee per
//! calendar date, together with the attendance type, check direction, and
//! capture method enums.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The externally assigned type of an attendance day.
///
/// A record without a type (`None` on the record) is valued from its hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    /// A full working day.
    Full,
    /// A half working day.
    Half,
    /// A partial-day absence counted against the monthly quota.
    ShortLeave,
    /// An overtime day.
    Ot,
    /// An absence.
    Absent,
}

/// Whether a check event marks arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckDirection {
    /// Check-in.
    In,
    /// Check-out.
    Out,
}

/// How a check event was captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMethod {
    /// Through an attendance link.
    #[default]
    Link,
    /// Through a fingerprint scanner.
    Fingerprint,
    /// Entered by an administrator.
    Manual,
    /// Anything else, including placeholder markers.
    #[serde(other)]
    Other,
}

/// One employee's attendance on one calendar date.
///
/// `(employee_id, date)` is the unique key: the store never holds two records
/// with the same pair.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceRecord, AttendanceType};
/// use chrono::NaiveDate;
///
/// let mut record = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// record.attendance_type = Some(AttendanceType::Full);
/// assert!(record.is_in_month(2026, 3));
/// assert!(!record.is_short_leave());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Check-in time as a 12-hour clock string (e.g. "09:00 AM").
    #[serde(default)]
    pub check_in: Option<String>,
    /// Check-out time as a 12-hour clock string (e.g. "05:30 PM").
    #[serde(default)]
    pub check_out: Option<String>,
    /// The externally assigned day type, if any.
    #[serde(default, rename = "type")]
    pub attendance_type: Option<AttendanceType>,
    /// Hours worked, derived from check-in and check-out.
    #[serde(default)]
    pub hours: Decimal,
    /// Overtime hours, if recorded.
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub ot_hours: Option<Decimal>,
    /// How the check events were captured.
    #[serde(default)]
    pub method: CheckMethod,
}

impl AttendanceRecord {
    /// Creates an empty record for the given employee and date.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            check_in: None,
            check_out: None,
            attendance_type: None,
            hours: Decimal::ZERO,
            ot_hours: None,
            method: CheckMethod::default(),
        }
    }

    /// Returns true if this record is keyed by the given employee and date.
    pub fn matches_key(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.employee_id == employee_id && self.date == date
    }

    /// Returns true if the record falls in the given calendar month (1-12).
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Returns true if the record is typed as a short leave.
    pub fn is_short_leave(&self) -> bool {
        self.attendance_type == Some(AttendanceType::ShortLeave)
    }

    /// Overtime hours, treating an absent value as zero.
    pub fn ot_hours_or_zero(&self) -> Decimal {
        self.ot_hours.unwrap_or(Decimal::ZERO)
    }
}

/// Accepts a number, a numeric string, null, or junk text.
///
/// Stored overtime values come from free-form inputs; anything that is not a
/// number is read as absent instead of failing the whole collection.
fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(Decimal),
        Text(String),
        Missing(Option<()>),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Number(value) => Some(value),
        Lenient::Text(_) | Lenient::Missing(_) => None,
    })
}
