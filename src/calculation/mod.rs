//! Calculation logic for the Attendance Valuation Engine.
//!
//! This module contains the worked-hours calculation from clock strings, the
//! per-record valuation rules, and the monthly aggregation and report
//! building on top of them.

mod hours;
mod monthly_summary;
mod valuation;

pub use hours::{HOURS_DECIMAL_PLACES, compute_hours, format_clock_time, parse_clock_minutes};
pub use monthly_summary::{
    MonthValuation, build_monthly_report, month_name, summarize, summarize_records, valuate_month,
};
pub use valuation::{
    FULL_DAY_HOURS, HALF_DAY_HOURS, RecordValuation, count_short_leaves, valuate_record, value_of,
};
