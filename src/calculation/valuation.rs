//! Attendance valuation rules.
//!
//! This module turns a single [`AttendanceRecord`] into a numeric attendance
//! value. The rules form an ordered decision list; the first matching branch
//! wins:
//!
//! 1. Typed `full` → the full-day value.
//! 2. Typed `half` → the half-day value.
//! 3. Typed `short_leave` → the short-leave value while the month's short-leave
//!    count is within the role's quota, otherwise the short-leave penalty.
//! 4. Anything else → valued from worked hours (8+ full, 4+ half, else 0).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AttendanceRules;
use crate::models::{AttendanceRecord, AttendanceType, AuditStep, Employee, ValueBasis};

/// Worked hours at or above which an untyped day counts as a full day.
pub const FULL_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Worked hours at or above which an untyped day counts as a half day.
pub const HALF_DAY_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// The result of valuing one record, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValuation {
    /// The attendance value.
    pub value: Decimal,
    /// Which rule branch produced the value.
    pub basis: ValueBasis,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Counts the short-leave records in a set of records.
///
/// The valuation rules compare the whole month's count against the quota,
/// not a running count up to each record, so every short leave in a month
/// over quota receives the penalty value. Pass the month's full record set.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::count_short_leaves;
/// use attendance_engine::models::{AttendanceRecord, AttendanceType};
/// use chrono::NaiveDate;
///
/// let mut leave = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// leave.attendance_type = Some(AttendanceType::ShortLeave);
/// let plain = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
///
/// assert_eq!(count_short_leaves(&[leave, plain]), 1);
/// ```
pub fn count_short_leaves(month_records: &[AttendanceRecord]) -> u32 {
    month_records.iter().filter(|r| r.is_short_leave()).count() as u32
}

/// Values a record and records why.
///
/// # Arguments
///
/// * `record` - The record to value
/// * `employee` - The record's employee (its role selects the short-leave quota)
/// * `rules` - The rule set in force
/// * `month_short_leaves` - The number of short-leave records in the record's
///   month for this employee, including this record
/// * `step_number` - The step number for audit trail sequencing
pub fn valuate_record(
    record: &AttendanceRecord,
    employee: &Employee,
    rules: &AttendanceRules,
    month_short_leaves: u32,
    step_number: u32,
) -> RecordValuation {
    let (value, basis, rule_id, rule_name, reasoning) = match record.attendance_type {
        Some(AttendanceType::Full) => (
            rules.full_day,
            ValueBasis::FullDay,
            "typed_full_day",
            "Full Day",
            format!("Record typed as full day: value {}", rules.full_day),
        ),
        Some(AttendanceType::Half) => (
            rules.half_day,
            ValueBasis::HalfDay,
            "typed_half_day",
            "Half Day",
            format!("Record typed as half day: value {}", rules.half_day),
        ),
        Some(AttendanceType::ShortLeave) => {
            let max_allowed = rules.max_short_leaves(employee.role);
            if month_short_leaves <= max_allowed {
                (
                    rules.short_leave_value,
                    ValueBasis::ShortLeaveWithinQuota,
                    "short_leave_quota",
                    "Short Leave Quota",
                    format!(
                        "{} short leaves this month within {} quota of {}: value {}",
                        month_short_leaves, employee.role, max_allowed, rules.short_leave_value
                    ),
                )
            } else {
                (
                    rules.short_leave_penalty,
                    ValueBasis::ShortLeaveOverQuota,
                    "short_leave_quota",
                    "Short Leave Quota",
                    format!(
                        "{} short leaves this month exceed {} quota of {}: penalty value {}",
                        month_short_leaves, employee.role, max_allowed, rules.short_leave_penalty
                    ),
                )
            }
        }
        _ => {
            if record.hours >= FULL_DAY_HOURS {
                (
                    rules.full_day,
                    ValueBasis::HoursFullDay,
                    "worked_hours",
                    "Worked Hours",
                    format!(
                        "{} hours worked is at least {}: full day value {}",
                        record.hours, FULL_DAY_HOURS, rules.full_day
                    ),
                )
            } else if record.hours >= HALF_DAY_HOURS {
                (
                    rules.half_day,
                    ValueBasis::HoursHalfDay,
                    "worked_hours",
                    "Worked Hours",
                    format!(
                        "{} hours worked is at least {}: half day value {}",
                        record.hours, HALF_DAY_HOURS, rules.half_day
                    ),
                )
            } else {
                (
                    Decimal::ZERO,
                    ValueBasis::NoCredit,
                    "worked_hours",
                    "Worked Hours",
                    format!(
                        "{} hours worked is under {}: no credit",
                        record.hours, HALF_DAY_HOURS
                    ),
                )
            }
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "employeeId": record.employee_id,
            "date": record.date.to_string(),
            "type": record.attendance_type,
            "hours": record.hours.to_string(),
            "role": employee.role,
            "monthShortLeaves": month_short_leaves,
        }),
        output: serde_json::json!({
            "value": value.to_string(),
            "basis": basis,
        }),
        reasoning,
    };

    RecordValuation {
        value,
        basis,
        audit_step,
    }
}

/// Returns the attendance value of a record.
///
/// See [`valuate_record`] for the arguments; this drops the audit step.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::value_of;
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::models::{AttendanceRecord, AttendanceType, Employee, Role};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     name: "John Doe".to_string(),
///     designation: None,
///     role: Role::Trainee,
///     is_contract: false,
/// };
/// let mut record = AttendanceRecord::new("EMP001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// record.attendance_type = Some(AttendanceType::Half);
///
/// let value = value_of(&record, &employee, &AttendanceRules::default(), 0);
/// assert_eq!(value, Decimal::new(5, 1));
/// ```
pub fn value_of(
    record: &AttendanceRecord,
    employee: &Employee,
    rules: &AttendanceRules,
    month_short_leaves: u32,
) -> Decimal {
    valuate_record(record, employee, rules, month_short_leaves, 0).value
}
