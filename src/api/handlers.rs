//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ensure_non_negative, run_payroll};
use crate::error::EngineError;
use crate::models::Employee;

use super::request::{CalculationRequest, PayrollRunRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/employees", get(list_employees_handler).post(add_employee_handler))
        .route("/payroll-runs", post(payroll_run_handler))
        .route("/config/reload", post(reload_config_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is in the body text, not the Display impl
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
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
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate.
///
/// Computes one payroll line from a salary and filing status.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = match state.config() {
        Ok(config) => config,
        Err(err) => return error_response(err),
    };

    let start_time = Instant::now();
    match CalculationResponse::compute(request.salary, request.tax_status, &config) {
        Ok(mut result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            result.audit_trace.duration_us = duration_us;
            info!(
                correlation_id = %correlation_id,
                tax_status = %request.tax_status,
                net_pay = %result.line.net_pay,
                duration_us,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    match state.employees().list() {
        Ok(employees) => json_response(StatusCode::OK, employees),
        Err(err) => {
            warn!(error = %err, "Listing employees failed");
            error_response(err)
        }
    }
}

/// Handler for POST /employees.
///
/// Returns 201 with the stored employee, or 409 if the ID is taken.
async fn add_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let employee = match payload {
        Ok(Json(employee)) => employee,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = ensure_non_negative("salary", employee.salary) {
        return error_response(err);
    }

    match state.employees().add(employee.clone()) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                "Employee added"
            );
            json_response(StatusCode::CREATED, employee)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                error = %err,
                "Adding employee failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /payroll-runs.
///
/// Runs payroll for every employee in the repository.
async fn payroll_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = request.into_period().and_then(|period| {
        let config = state.config()?;
        let employees = state.employees().list()?;
        run_payroll(&employees, period, config.config())
    });

    match result {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                employee_count = run.totals.employee_count,
                "Payroll run completed successfully"
            );
            json_response(StatusCode::OK, run)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll run failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /config/reload.
async fn reload_config_handler(State(state): State<AppState>) -> Response {
    match state.reload_config() {
        Ok(config) => {
            let regime = config.regime();
            json_response(
                StatusCode::OK,
                serde_json::json!({
                    "code": regime.code,
                    "name": regime.name,
                    "version": regime.version,
                }),
            )
        }
        Err(err) => {
            warn!(
                path = %state.config_dir().display(),
                error = %err,
                "Configuration reload failed"
            );
            error_response(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{PayrollRun, TaxFilingStatus};
    use crate::repository::InMemoryEmployeeRepository;
    use crate::test_support::create_test_employee;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/idn").expect("Failed to load config");
        AppState::new(
            "./config/idn",
            config,
            Arc::new(InMemoryEmployeeRepository::default()),
        )
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_line_and_trace() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/calculate",
                r#"{ "salary": "15000000", "tax_status": "K/1" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: CalculationResponse = body_json(response).await;
        assert_eq!(result.line.net_pay, Decimal::new(13_129_521, 0));
        assert_eq!(result.audit_trace.steps.len(), 5);
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calculate", r#"{ "salary": "15000000" }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("tax_status"));
    }

    #[tokio::test]
    async fn test_calculate_unknown_status_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/calculate",
                r#"{ "salary": "15000000", "tax_status": "K/9" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_calculate_negative_salary_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/calculate",
                r#"{ "salary": "-1", "tax_status": "TK/0" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_add_employee_then_conflict() {
        let state = create_test_state();
        let employee = create_test_employee("EMP001", "15000000", TaxFilingStatus::K1);
        let body = serde_json::to_string(&employee).unwrap();

        let first = create_router(state.clone())
            .oneshot(post_json("/employees", body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = create_router(state)
            .oneshot(post_json("/employees", body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let error: ApiError = body_json(second).await;
        assert_eq!(error.code, "DUPLICATE_EMPLOYEE");
    }

    #[tokio::test]
    async fn test_list_employees() {
        let state = create_test_state();
        state
            .employees()
            .add(create_test_employee("EMP001", "8000000", TaxFilingStatus::Tk0))
            .unwrap();

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/employees")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let employees: Vec<Employee> = body_json(response).await;
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, "EMP001");
    }

    #[tokio::test]
    async fn test_payroll_run_covers_repository() {
        let state = create_test_state();
        state
            .employees()
            .add(create_test_employee("EMP001", "15000000", TaxFilingStatus::K1))
            .unwrap();
        state
            .employees()
            .add(create_test_employee("EMP002", "8000000", TaxFilingStatus::Tk0))
            .unwrap();

        let response = create_router(state)
            .oneshot(post_json("/payroll-runs", r#"{ "year": 2024, "month": 7 }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let run: PayrollRun = body_json(response).await;
        assert_eq!(run.payslips.len(), 2);
        assert_eq!(run.totals.gross_salary, Decimal::new(23_000_000, 0));
    }

    #[tokio::test]
    async fn test_payroll_run_invalid_month_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(post_json("/payroll-runs", r#"{ "year": 2024, "month": 13 }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reload_config_returns_regime() {
        let response = create_router(create_test_state())
            .oneshot(post_json("/config/reload", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["code"], "ID-2024");
    }
}
