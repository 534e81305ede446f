//! HTTP API module for the attendance engine.
//!
//! This module exposes check events, record updates, monthly summaries and
//! reports, and the rule set over JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CheckEventRequest, MonthQuery, SetOvertimeRequest, SetTypeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
