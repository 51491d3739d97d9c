//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contribution;
mod employee;
mod pay_period;
mod payroll_result;
mod tax_status;

pub use contribution::{ContributionResult, ContributionScheme, ContributionSplit};
pub use employee::Employee;
pub use pay_period::PayPeriod;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, PayrollLineResult, PayrollRun,
    PayrollTotals, Payslip,
};
pub use tax_status::{TaxCategory, TaxFilingStatus};
