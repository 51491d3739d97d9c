//! BPJS Kesehatan contribution calculation.
//!
//! Health insurance is charged on the salary up to the configured cap,
//! split between employer and employee.

use rust_decimal::Decimal;

use crate::config::ContributionRateTable;
use crate::error::EngineResult;
use crate::models::{ContributionResult, ContributionScheme};

use super::ensure_non_negative;

/// Calculates the health insurance contribution for a monthly salary.
///
/// The contribution base is `min(salary, cap)`; the company and employee
/// rates are each applied to that base. With the reference table (4% / 1%,
/// cap 12,000,000) a salary above the cap always yields 480,000 / 120,000.
///
/// # Arguments
///
/// * `salary` - Gross monthly salary, must not be negative
/// * `table` - The contribution rate table
///
/// # Returns
///
/// A `ContributionResult` with a single `health` entry, or `InvalidInput`
/// if the salary is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_health_contribution;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let result =
///     calculate_health_contribution(Decimal::new(8_000_000, 0), loader.contributions()).unwrap();
/// assert_eq!(result.health_company(), Decimal::new(320_000, 0));
/// assert_eq!(result.health_employee(), Decimal::new(80_000, 0));
/// ```
pub fn calculate_health_contribution(
    salary: Decimal,
    table: &ContributionRateTable,
) -> EngineResult<ContributionResult> {
    ensure_non_negative("salary", salary)?;

    let rate = table.scheme(ContributionScheme::Health)?;

    let mut result = ContributionResult::default();
    result.insert(ContributionScheme::Health, rate.split(salary));
    Ok(result)
}
