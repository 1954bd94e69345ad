//! HTTP API for the Payroll Computation Engine.
//!
//! This module provides the axum router, request/response types, and
//! application state for the engine's HTTP surface.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, DailyTipRequest, EmployeeProfileRequest, ExportRequest, ExportRowRequest,
    PayPeriodRequest, PayRecordRequest, PenaltyToggleRequest, TimesheetEntryRequest,
    TipAmountRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayRecordResponse, PayRunTotals,
    PenaltyToggleResponse,
};
pub use state::AppState;
