//! Monthly aggregation of attendance values.
//!
//! A month is valued by counting its short-leave records once, valuing every
//! record against that count, and classifying the results. Nothing here
//! mutates the store, so repeated calls over unchanged data return identical
//! results.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AttendanceRules;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AuditStep, AuditWarning, Employee, MonthlyReport, MonthlySummary,
    ValueBasis, ValuedRecord,
};
use crate::store::AttendanceStore;

use super::valuation::{count_short_leaves, valuate_record};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Every record of a month valued, plus the summary and audit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthValuation {
    /// Records with their values, in input order.
    pub records: Vec<ValuedRecord>,
    /// The aggregated summary.
    pub summary: MonthlySummary,
    /// One audit step per record.
    pub audit_steps: Vec<AuditStep>,
    /// Data issues noticed along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Returns the English name of a month (1-12), or `None` if out of range.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::month_name;
///
/// assert_eq!(month_name(3), Some("March"));
/// assert_eq!(month_name(13), None);
/// ```
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Values every record of one employee's month.
///
/// `month_records` must be the complete set of the employee's records for a
/// single month: the short-leave count used for every record is taken over
/// this whole set.
pub fn valuate_month(
    month_records: &[AttendanceRecord],
    employee: &Employee,
    rules: &AttendanceRules,
) -> MonthValuation {
    let month_short_leaves = count_short_leaves(month_records);
    let half = Decimal::new(5, 1);

    let mut summary = MonthlySummary::default();
    let mut records = Vec::with_capacity(month_records.len());
    let mut audit_steps = Vec::with_capacity(month_records.len());
    let mut warnings = Vec::new();

    for (index, record) in month_records.iter().enumerate() {
        let valuation = valuate_record(
            record,
            employee,
            rules,
            month_short_leaves,
            index as u32 + 1,
        );

        summary.total_value += valuation.value;
        if record.is_short_leave() {
            summary.short_leaves += 1;
        } else if valuation.value == Decimal::ONE {
            summary.full_days += 1;
        } else if valuation.value == half {
            summary.half_days += 1;
        }
        summary.total_ot += record.ot_hours_or_zero();

        if record.check_in.is_some() && record.check_out.is_none() {
            warnings.push(AuditWarning {
                code: "MISSING_CHECK_OUT".to_string(),
                message: format!("No check-out recorded on {}", record.date),
                severity: "low".to_string(),
            });
        }

        records.push(ValuedRecord {
            record: record.clone(),
            attendance_value: valuation.value,
            basis: valuation.basis,
        });
        audit_steps.push(valuation.audit_step);
    }

    summary.working_days = month_records.len() as u32;

    if records
        .iter()
        .any(|r| r.basis == ValueBasis::ShortLeaveOverQuota)
    {
        warnings.push(AuditWarning {
            code: "SHORT_LEAVE_QUOTA_EXCEEDED".to_string(),
            message: format!(
                "{} short leaves against a {} quota of {}",
                month_short_leaves,
                employee.role,
                rules.max_short_leaves(employee.role)
            ),
            severity: "medium".to_string(),
        });
    }

    MonthValuation {
        records,
        summary,
        audit_steps,
        warnings,
    }
}

/// Aggregates one employee's month of records into a [`MonthlySummary`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::summarize_records;
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::models::{AttendanceRecord, AttendanceType, Employee, Role};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP002".to_string(),
///     name: "Jane Smith".to_string(),
///     designation: None,
///     role: Role::Junior,
///     is_contract: false,
/// };
/// let mut day = AttendanceRecord::new("EMP002", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// day.attendance_type = Some(AttendanceType::Full);
///
/// let summary = summarize_records(&[day], &employee, &AttendanceRules::default());
/// assert_eq!(summary.full_days, 1);
/// assert_eq!(summary.total_value, Decimal::ONE);
/// ```
pub fn summarize_records(
    month_records: &[AttendanceRecord],
    employee: &Employee,
    rules: &AttendanceRules,
) -> MonthlySummary {
    valuate_month(month_records, employee, rules).summary
}

/// Summarizes an employee's month from the store.
///
/// Returns `Ok(None)` when the employee is unknown.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Persistence`] if the store cannot be read.
pub fn summarize(
    store: &AttendanceStore,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<Option<MonthlySummary>> {
    let Some(employee) = store.get_employee(employee_id)? else {
        debug!(employee_id, "Summary requested for unknown employee");
        return Ok(None);
    };
    let rules = store.get_rules()?;
    let records = store.get_records_for_month(employee_id, year, month)?;

    Ok(Some(summarize_records(&records, &employee, &rules)))
}

/// Builds the structured monthly report consumed by report exporters.
///
/// Returns `Ok(None)` when the employee is unknown.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Persistence`] if the store cannot be read.
pub fn build_monthly_report(
    store: &AttendanceStore,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<Option<MonthlyReport>> {
    let Some(employee) = store.get_employee(employee_id)? else {
        debug!(employee_id, "Report requested for unknown employee");
        return Ok(None);
    };
    let rules = store.get_rules()?;
    let records = store.get_records_for_month(employee_id, year, month)?;
    let valuation = valuate_month(&records, &employee, &rules);

    Ok(Some(MonthlyReport {
        show_overtime: employee.is_contract,
        employee,
        year,
        month,
        month_name: month_name(month).unwrap_or_default().to_string(),
        records: valuation.records,
        summary: valuation.summary,
        audit_steps: valuation.audit_steps,
        warnings: valuation.warnings,
    }))
}
