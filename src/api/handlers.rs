//! HTTP request handlers for the attendance API.
//!
//! Every handler locks the store once, performs one store or valuation
//! operation, and maps [`EngineError`](crate::error::EngineError) values to
//! JSON error bodies.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_monthly_report, summarize};
use crate::config::AttendanceRules;
use crate::models::{AttendanceRecord, MonthlyReport, MonthlySummary};

use super::request::{CheckEventRequest, MonthQuery, SetOvertimeRequest, SetTypeRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check", post(check_event_handler))
        .route("/attendance/type", put(set_type_handler))
        .route("/attendance/overtime", put(set_overtime_handler))
        .route("/employees/:id/attendance", get(month_records_handler))
        .route("/employees/:id/summary", get(summary_handler))
        .route("/employees/:id/report", get(report_handler))
        .route("/rules", get(get_rules_handler).put(update_rules_handler))
        .with_state(state)
}

/// Handler for POST /attendance/check.
///
/// Records a check-in or check-out and returns the updated record.
async fn check_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckEventRequest>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check event");

    let request = parse_body(correlation_id, payload)?;
    let timestamp = request.timestamp_or_now();

    let record = state
        .store()?
        .record_check_event_via(&request.employee_id, request.direction, timestamp, request.method)
        .map_err(|err| log_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        hours = %record.hours,
        "Check event recorded"
    );
    Ok(Json(record))
}

/// Handler for PUT /attendance/type.
async fn set_type_handler(
    State(state): State<AppState>,
    payload: Result<Json<SetTypeRequest>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let record = state
        .store()?
        .set_record_type(&request.employee_id, request.date, request.attendance_type)
        .map_err(|err| log_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        attendance_type = ?record.attendance_type,
        "Attendance type set"
    );
    Ok(Json(record))
}

/// Handler for PUT /attendance/overtime.
async fn set_overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<SetOvertimeRequest>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let record = state
        .store()?
        .set_ot_hours(&request.employee_id, request.date, request.ot_hours)
        .map_err(|err| log_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        date = %record.date,
        ot_hours = %request.ot_hours,
        "Overtime hours set"
    );
    Ok(Json(record))
}

/// Handler for GET /employees/:id/attendance.
///
/// Lists the month's records in date order. Records of unregistered
/// employees are listed too.
async fn month_records_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let (year, month) = resolve_month(query)?;
    let records = state.store()?.get_records_for_month(&employee_id, year, month)?;
    Ok(Json(records))
}

/// Handler for GET /employees/:id/summary.
async fn summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<MonthlySummary> {
    let correlation_id = Uuid::new_v4();
    let (year, month) = resolve_month(query)?;

    let start_time = Instant::now();
    let summary = summarize(&*state.store()?, &employee_id, year, month)?
        .ok_or_else(|| employee_not_found(correlation_id, &employee_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        month,
        total_value = %summary.total_value,
        duration_us = start_time.elapsed().as_micros(),
        "Monthly summary computed"
    );
    Ok(Json(summary))
}

/// Handler for GET /employees/:id/report.
async fn report_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<MonthlyReport> {
    let correlation_id = Uuid::new_v4();
    let (year, month) = resolve_month(query)?;

    let report = build_monthly_report(&*state.store()?, &employee_id, year, month)?
        .ok_or_else(|| employee_not_found(correlation_id, &employee_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        records = report.records.len(),
        warnings = report.warnings.len(),
        "Monthly report built"
    );
    Ok(Json(report))
}

/// Handler for GET /rules.
async fn get_rules_handler(State(state): State<AppState>) -> ApiResult<AttendanceRules> {
    Ok(Json(state.store()?.get_rules()?))
}

/// Handler for PUT /rules.
///
/// Missing fields take their documented defaults before validation.
async fn update_rules_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRules>, JsonRejection>,
) -> ApiResult<AttendanceRules> {
    let correlation_id = Uuid::new_v4();
    let rules = parse_body(correlation_id, payload)?;

    state
        .store()?
        .update_rules(rules.clone())
        .map_err(|err| log_failure(correlation_id, err))?;
    Ok(Json(rules))
}

fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn resolve_month(
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<(i32, u32), ApiErrorResponse> {
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    query.resolve().ok_or_else(|| {
        ApiErrorResponse::bad_request(ApiError::validation_error(
            "month must be between 1 and 12",
        ))
    })
}

fn employee_not_found(correlation_id: Uuid, employee_id: &str) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Employee not found"
    );
    crate::error::EngineError::EmployeeNotFound {
        id: employee_id.to_string(),
    }
    .into()
}

fn log_failure(correlation_id: Uuid, err: crate::error::EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}
