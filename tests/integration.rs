//! End-to-end tests for the attendance API.
//!
//! This suite drives the router the way a client would:
//! - Check-in/check-out sequences and record uniqueness
//! - Hours derived from check times, including the overnight clamp
//! - Monthly summaries with short-leave quotas
//! - Monthly reports for contract and non-contract staff
//! - Rule updates changing later summaries
//! - File-backed persistence across restarts
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{Employee, Role};
use attendance_engine::store::{
    AttendanceRepository, AttendanceStore, InMemoryRepository, JsonFileRepository,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn staff() -> Vec<Employee> {
    vec![
        Employee {
            id: "EMP001".to_string(),
            name: "John Doe".to_string(),
            designation: Some("Trainee Associate".to_string()),
            role: Role::Trainee,
            is_contract: false,
        },
        Employee {
            id: "EMP002".to_string(),
            name: "Jane Smith".to_string(),
            designation: Some("Junior Developer".to_string()),
            role: Role::Junior,
            is_contract: false,
        },
        Employee {
            id: "EMP003".to_string(),
            name: "Bob Johnson".to_string(),
            designation: None,
            role: Role::Contract,
            is_contract: true,
        },
    ]
}

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = AttendanceStore::new(InMemoryRepository::with_employees(staff()), config);
    AppState::new(store)
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("Expected a decimal, got {}", other),
    }
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn check(state: &AppState, employee_id: &str, direction: &str, timestamp: &str) -> Value {
    let (status, body) = send(
        create_router(state.clone()),
        "POST",
        "/attendance/check",
        Some(json!({
            "employeeId": employee_id,
            "direction": direction,
            "timestamp": timestamp,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "check event failed: {}", body);
    body
}

async fn set_type(state: &AppState, employee_id: &str, date: &str, kind: &str) {
    let (status, body) = send(
        create_router(state.clone()),
        "PUT",
        "/attendance/type",
        Some(json!({ "employeeId": employee_id, "date": date, "type": kind })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "set type failed: {}", body);
}

async fn summary(state: &AppState, employee_id: &str) -> Value {
    let (status, body) = send(
        create_router(state.clone()),
        "GET",
        &format!("/employees/{}/summary?year=2026&month=3", employee_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "summary failed: {}", body);
    body
}

// =============================================================================
// Check events
// =============================================================================

#[tokio::test]
async fn test_check_in_then_out_produces_one_record_with_hours() {
    let state = create_test_state();

    check(&state, "EMP002", "in", "2026-03-02T09:00:00").await;
    let record = check(&state, "EMP002", "out", "2026-03-02T17:30:00").await;

    assert_eq!(record["checkIn"], "09:00 AM");
    assert_eq!(record["checkOut"], "05:30 PM");
    assert_eq!(decimal(&record["hours"]), Decimal::from_str("8.50").unwrap());

    check(&state, "EMP002", "in", "2026-03-02T09:15:00").await;

    let (status, records) = send(
        create_router(state.clone()),
        "GET",
        "/employees/EMP002/attendance?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["checkIn"], "09:15 AM");
    assert_eq!(decimal(&records[0]["hours"]), Decimal::from_str("8.25").unwrap());
}

#[tokio::test]
async fn test_midnight_check_in_computes_one_hour() {
    let state = create_test_state();

    check(&state, "EMP002", "in", "2026-03-02T00:00:00").await;
    let record = check(&state, "EMP002", "out", "2026-03-02T01:00:00").await;

    assert_eq!(record["checkIn"], "12:00 AM");
    assert_eq!(decimal(&record["hours"]), Decimal::ONE);
}

#[tokio::test]
async fn test_check_out_before_check_in_clamps_hours_to_zero() {
    let state = create_test_state();

    check(&state, "EMP002", "in", "2026-03-02T22:00:00").await;
    let record = check(&state, "EMP002", "out", "2026-03-02T06:00:00").await;

    assert_eq!(decimal(&record["hours"]), Decimal::ZERO);
    assert_eq!(record["checkOut"], "06:00 AM");
}

#[tokio::test]
async fn test_unknown_employee_check_event_is_accepted() {
    let state = create_test_state();
    let record = check(&state, "EMP999", "in", "2026-03-02T09:00:00").await;
    assert_eq!(record["employeeId"], "EMP999");
}

#[tokio::test]
async fn test_records_are_listed_in_date_order() {
    let state = create_test_state();

    check(&state, "EMP002", "in", "2026-03-20T09:00:00").await;
    check(&state, "EMP002", "in", "2026-03-03T09:00:00").await;
    check(&state, "EMP002", "in", "2026-04-01T09:00:00").await;
    check(&state, "EMP002", "in", "2026-03-11T09:00:00").await;

    let (_, records) = send(
        create_router(state),
        "GET",
        "/employees/EMP002/attendance?year=2026&month=3",
        None,
    )
    .await;
    let dates: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-03-03", "2026-03-11", "2026-03-20"]);
}

// =============================================================================
// Monthly summaries
// =============================================================================

#[tokio::test]
async fn test_worked_hours_summary() {
    let state = create_test_state();

    // 8.5 hours: full day
    check(&state, "EMP002", "in", "2026-03-02T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-02T17:30:00").await;
    // 5 hours: half day
    check(&state, "EMP002", "in", "2026-03-03T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-03T14:00:00").await;
    // 2 hours: no credit
    check(&state, "EMP002", "in", "2026-03-04T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-04T11:00:00").await;

    let body = summary(&state, "EMP002").await;
    assert_eq!(body["fullDays"], 1);
    assert_eq!(body["halfDays"], 1);
    assert_eq!(body["shortLeaves"], 0);
    assert_eq!(body["workingDays"], 3);
    assert_eq!(decimal(&body["totalValue"]), Decimal::from_str("1.5").unwrap());
}

#[tokio::test]
async fn test_short_leaves_over_quota_all_take_penalty() {
    let state = create_test_state();

    set_type(&state, "EMP001", "2026-03-02", "short_leave").await;
    set_type(&state, "EMP001", "2026-03-10", "short_leave").await;

    let within = summary(&state, "EMP001").await;
    assert_eq!(within["shortLeaves"], 2);
    assert_eq!(decimal(&within["totalValue"]), Decimal::from(2));

    set_type(&state, "EMP001", "2026-03-20", "short_leave").await;

    let over = summary(&state, "EMP001").await;
    assert_eq!(over["shortLeaves"], 3);
    assert_eq!(over["halfDays"], 0);
    assert_eq!(decimal(&over["totalValue"]), Decimal::from_str("1.5").unwrap());
}

#[tokio::test]
async fn test_typed_records_override_hours() {
    let state = create_test_state();

    check(&state, "EMP002", "in", "2026-03-02T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-02T10:00:00").await;
    set_type(&state, "EMP002", "2026-03-02", "full").await;

    check(&state, "EMP002", "in", "2026-03-03T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-03T18:00:00").await;
    set_type(&state, "EMP002", "2026-03-03", "half").await;

    let body = summary(&state, "EMP002").await;
    assert_eq!(body["fullDays"], 1);
    assert_eq!(body["halfDays"], 1);
    assert_eq!(decimal(&body["totalValue"]), Decimal::from_str("1.5").unwrap());
}

#[tokio::test]
async fn test_summary_is_idempotent() {
    let state = create_test_state();
    check(&state, "EMP002", "in", "2026-03-02T09:00:00").await;
    check(&state, "EMP002", "out", "2026-03-02T13:00:00").await;

    let first = summary(&state, "EMP002").await;
    let second = summary(&state, "EMP002").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rule_update_changes_later_summaries() {
    let state = create_test_state();
    set_type(&state, "EMP002", "2026-03-02", "short_leave").await;

    let (status, _) = send(
        create_router(state.clone()),
        "PUT",
        "/rules",
        Some(json!({ "shortLeaves": { "junior": 0 }, "shortLeavePenalty": 0.25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = summary(&state, "EMP002").await;
    assert_eq!(decimal(&body["totalValue"]), Decimal::from_str("0.25").unwrap());
}

// =============================================================================
// Monthly reports
// =============================================================================

#[tokio::test]
async fn test_contract_report_shows_overtime() {
    let state = create_test_state();

    set_type(&state, "EMP003", "2026-03-02", "ot").await;
    check(&state, "EMP003", "in", "2026-03-02T08:00:00").await;
    check(&state, "EMP003", "out", "2026-03-02T18:00:00").await;
    let (status, _) = send(
        create_router(state.clone()),
        "PUT",
        "/attendance/overtime",
        Some(json!({ "employeeId": "EMP003", "date": "2026-03-02", "otHours": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, report) = send(
        create_router(state),
        "GET",
        "/employees/EMP003/report?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["showOvertime"], true);
    assert_eq!(report["monthName"], "March");
    assert_eq!(report["employee"]["name"], "Bob Johnson");
    assert_eq!(decimal(&report["summary"]["totalOt"]), Decimal::from(2));
    assert_eq!(report["records"].as_array().unwrap().len(), 1);
    assert_eq!(decimal(&report["records"][0]["attendanceValue"]), Decimal::ONE);
    assert_eq!(report["auditSteps"][0]["ruleId"], "worked_hours");
}

#[tokio::test]
async fn test_report_warns_about_missing_check_out() {
    let state = create_test_state();
    check(&state, "EMP001", "in", "2026-03-02T09:00:00").await;

    let (status, report) = send(
        create_router(state),
        "GET",
        "/employees/EMP001/report?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["showOvertime"], false);
    assert_eq!(report["warnings"][0]["code"], "MISSING_CHECK_OUT");
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_file_backed_store_survives_restart() {
    let data_dir: PathBuf = std::env::temp_dir().join(format!("attendance-it-{}", Uuid::new_v4()));
    let mut repository = JsonFileRepository::new(&data_dir);
    repository.save_employees(&staff()).unwrap();

    let open = || {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(AttendanceStore::new(JsonFileRepository::new(&data_dir), config))
    };

    let first = open();
    check(&first, "EMP002", "in", "2026-03-02T09:00:00").await;
    check(&first, "EMP002", "out", "2026-03-02T17:00:00").await;
    drop(first);

    let second = open();
    let body = summary(&second, "EMP002").await;
    assert_eq!(body["fullDays"], 1);
    assert!(data_dir.join("attendance.json").exists());

    std::fs::remove_dir_all(&data_dir).ok();
}

#[tokio::test]
async fn test_fresh_data_dir_serves_shipped_staff() {
    let data_dir: PathBuf = std::env::temp_dir().join(format!("attendance-it-{}", Uuid::new_v4()));
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = AttendanceStore::open(JsonFileRepository::new(&data_dir), config).unwrap();
    let state = AppState::new(store);

    check(&state, "EMP001", "in", "2026-03-02T09:00:00").await;
    check(&state, "EMP001", "out", "2026-03-02T13:30:00").await;

    let body = summary(&state, "EMP001").await;
    assert_eq!(body["halfDays"], 1);

    let (status, report) = send(
        create_router(state),
        "GET",
        "/employees/EMP003/report?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["employee"]["name"], "Mike Johnson");
    assert_eq!(report["showOvertime"], true);

    std::fs::remove_dir_all(&data_dir).ok();
}

#[tokio::test]
async fn test_corrupted_attendance_file_returns_500() {
    let data_dir: PathBuf = std::env::temp_dir().join(format!("attendance-it-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("attendance.json"), "not json").unwrap();

    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::new(AttendanceStore::new(JsonFileRepository::new(&data_dir), config));

    let (status, body) = send(
        create_router(state),
        "GET",
        "/employees/EMP002/attendance?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PERSISTENCE_ERROR");

    std::fs::remove_dir_all(&data_dir).ok();
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_report_for_unknown_employee_returns_404() {
    let (status, body) = send(
        create_router(create_test_state()),
        "GET",
        "/employees/EMP999/report?year=2026&month=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_direction_returns_400() {
    let (status, body) = send(
        create_router(create_test_state()),
        "POST",
        "/attendance/check",
        Some(json!({ "employeeId": "EMP001", "direction": "sideways" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (status, _) = send(create_router(create_test_state()), "GET", "/calculate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
