//! Employee model.
//!
//! This module defines the [`Employee`] record supplied by the caller's
//! employee repository. The engine only reads the salary and tax status;
//! the remaining fields travel through to payslips.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxFilingStatus;

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub name: String,
    /// The department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// The employee's position or job title.
    #[serde(default)]
    pub position: String,
    /// Gross monthly salary in whole rupiah.
    pub salary: Decimal,
    /// Bank account number used to route the net pay transfer.
    pub bank_account: String,
    /// PTKP filing status used for withholding.
    pub tax_status: TaxFilingStatus,
    /// The date the employee joined.
    pub join_date: NaiveDate,
}
