//! Calculation logic for the payroll engine.
//!
//! This module contains the contribution calculators (BPJS Kesehatan and
//! BPJS Ketenagakerjaan), PPh 21 withholding using TER brackets, the
//! per-employee payroll line, batch payroll runs, and the audit trace that
//! explains each line.

mod audit;
mod employment_security;
mod health;
mod payroll_line;
mod payroll_run;
mod withholding;

pub use audit::{NEGATIVE_NET_PAY_WARNING, trace_payroll_line};
pub use employment_security::calculate_employment_security_contribution;
pub use health::calculate_health_contribution;
pub use payroll_line::{compute_payroll_line, compute_payroll_line_with_policy};
pub use payroll_run::run_payroll;
pub use withholding::{
    WithholdingResult, calculate_withholding, calculate_withholding_detail, classify_category,
    classify_status_code,
};

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Rejects negative monetary inputs.
pub(crate) fn ensure_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", amount),
        });
    }
    Ok(())
}
