//! BPJS Ketenagakerjaan contribution calculation.
//!
//! Employment security covers four sub-schemes drawn from the same salary:
//! workplace accident (JKK), death benefit (JKM), old-age savings (JHT) and
//! pension (JP). Each scheme applies its own cap, if any, independently.

use rust_decimal::Decimal;

use crate::config::ContributionRateTable;
use crate::error::EngineResult;
use crate::models::{ContributionResult, ContributionScheme};

use super::ensure_non_negative;

/// Calculates the employment security contributions for a monthly salary.
///
/// With the reference table JKK (0.24%), JKM (0.3%) and JHT (3.7% / 2%)
/// are uncapped and JP (2% / 1%) is capped at 10,047,900, so JHT grows
/// with salary while JP stops growing at the pension cap.
///
/// # Arguments
///
/// * `salary` - Gross monthly salary, must not be negative
/// * `table` - The contribution rate table
///
/// # Returns
///
/// A `ContributionResult` with `jkk`, `jkm`, `jht` and `jp` entries, or
/// `InvalidInput` if the salary is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_employment_security_contribution;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let result = calculate_employment_security_contribution(
///     Decimal::new(15_000_000, 0),
///     loader.contributions(),
/// )
/// .unwrap();
/// assert_eq!(result.jht_employee(), Decimal::new(300_000, 0));
/// assert_eq!(result.jp_employee(), Decimal::new(100_479, 0));
/// ```
pub fn calculate_employment_security_contribution(
    salary: Decimal,
    table: &ContributionRateTable,
) -> EngineResult<ContributionResult> {
    ensure_non_negative("salary", salary)?;

    let mut result = ContributionResult::default();
    for scheme in ContributionScheme::EMPLOYMENT_SECURITY {
        let rate = table.scheme(scheme)?;
        result.insert(scheme, rate.split(salary));
    }
    Ok(result)
}
