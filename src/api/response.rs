//! Response types for the payroll API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{compute_payroll_line_with_policy, trace_payroll_line};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, PayrollLineResult, TaxFilingStatus};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::MissingScheme { .. }
            | EngineError::MissingTaxCategory { .. }
            | EngineError::InvalidConfiguration { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidInput { field, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("The field '{}' contains an invalid value", field),
                ),
            ),
            EngineError::UnknownTaxStatus { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_TAX_STATUS",
                    message,
                    "Valid codes are TK/0, K/0, K/1, K/2 and K/3",
                ),
            ),
            EngineError::NegativeNetPay { .. } => ApiErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "NEGATIVE_NET_PAY",
                    message,
                    "The active policy rejects negative net pay",
                ),
            ),
            EngineError::DuplicateEmployee { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_EMPLOYEE", message),
            ),
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::EmployeeCalculation {
                employee_id,
                source,
            } => {
                let inner: ApiErrorResponse = (*source).into();
                ApiErrorResponse::new(
                    inner.status,
                    ApiError::with_details(
                        inner.error.code,
                        message,
                        format!("Payroll run stopped at employee '{}'", employee_id),
                    ),
                )
            }
            EngineError::LockPoisoned { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", message),
            ),
        }
    }
}

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The computed payroll line.
    pub line: PayrollLineResult,
    /// How the line was computed.
    pub audit_trace: AuditTrace,
}

impl CalculationResponse {
    /// Computes a line and its trace against a configuration snapshot.
    pub fn compute(
        salary: Decimal,
        tax_status: TaxFilingStatus,
        config: &ConfigLoader,
    ) -> EngineResult<Self> {
        let line = compute_payroll_line_with_policy(
            salary,
            tax_status,
            config.contributions(),
            config.withholding(),
            config.policy(),
        )?;
        let audit_trace = trace_payroll_line(tax_status, &line);
        Ok(Self { line, audit_trace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidInput {
            field: "salary".to_string(),
            message: "must not be negative".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_tax_status_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::UnknownTaxStatus {
            code: "K/9".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert!(api_error.error.message.contains("K/9"));
    }

    #[test]
    fn test_duplicate_employee_maps_to_conflict() {
        let api_error: ApiErrorResponse = EngineError::DuplicateEmployee {
            id: "EMP001".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "DUPLICATE_EMPLOYEE");
    }

    #[test]
    fn test_negative_net_pay_maps_to_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::NegativeNetPay {
            net_pay: Decimal::new(-20_000, 0),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse = EngineError::MissingScheme {
            scheme: "jp".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_lock_poisoned_maps_to_internal_error() {
        for resource in ["configuration snapshot", "employee store"] {
            let api_error: ApiErrorResponse = EngineError::LockPoisoned {
                resource: resource.to_string(),
            }
            .into();
            assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_error.error.code, "INTERNAL_ERROR");
        }
    }

    #[test]
    fn test_employee_calculation_takes_status_of_cause() {
        let api_error: ApiErrorResponse = EngineError::EmployeeCalculation {
            employee_id: "EMP002".to_string(),
            source: Box::new(EngineError::NegativeNetPay {
                net_pay: Decimal::new(-1, 0),
            }),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "NEGATIVE_NET_PAY");
        assert!(api_error.error.details.unwrap().contains("EMP002"));
    }

    #[test]
    fn test_calculation_response_computes_line_and_trace() {
        let config = ConfigLoader::load("./config/idn").unwrap();
        let response =
            CalculationResponse::compute(Decimal::new(15_000_000, 0), TaxFilingStatus::K1, &config)
                .unwrap();

        assert_eq!(response.line.net_pay, Decimal::new(13_129_521, 0));
        assert_eq!(response.audit_trace.steps.len(), 5);
    }
}
