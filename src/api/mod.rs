//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for computing payroll
//! lines, managing employees, and running monthly payroll.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, PayrollRunRequest};
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
