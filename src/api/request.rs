//! Request types for the payroll API.
//!
//! Employees are posted using the [`Employee`](crate::models::Employee)
//! model directly; this module holds the bodies that have no domain
//! counterpart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayPeriod, TaxFilingStatus};

/// Request body for the `/calculate` endpoint.
///
/// Computes a single payroll line without touching the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross monthly salary.
    pub salary: Decimal,
    /// PTKP filing status code, e.g. `"K/1"`.
    pub tax_status: TaxFilingStatus,
}

/// Request body for the `/payroll-runs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u32,
}

impl PayrollRunRequest {
    /// Converts the request into a validated pay period.
    pub fn into_period(self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }
}
