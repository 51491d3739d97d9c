//! Per-employee payroll line aggregation.
//!
//! Combines the contribution and withholding calculators into a net pay
//! figure for one employee and one period.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{
    ContributionRateTable, NegativeNetPay, PayrollPolicy, Rounding, WithholdingBracketTable,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContributionResult, ContributionSplit, DeductionBreakdown, PayrollLineResult, TaxFilingStatus,
};

use super::{
    calculate_employment_security_contribution, calculate_health_contribution,
    calculate_withholding_detail,
};

/// Computes a payroll line under the default policy.
///
/// Equivalent to [`compute_payroll_line_with_policy`] with exact amounts
/// and negative net pay passed through unchanged.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll_line;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::TaxFilingStatus;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let line = compute_payroll_line(
///     Decimal::new(15_000_000, 0),
///     TaxFilingStatus::K1,
///     loader.contributions(),
///     loader.withholding(),
/// )
/// .unwrap();
/// assert_eq!(line.total_employee_contribution, Decimal::new(520_479, 0));
/// assert_eq!(line.withheld_tax, Decimal::new(1_350_000, 0));
/// assert_eq!(line.net_pay, Decimal::new(13_129_521, 0));
/// ```
pub fn compute_payroll_line(
    salary: Decimal,
    status: TaxFilingStatus,
    contributions: &ContributionRateTable,
    brackets: &WithholdingBracketTable,
) -> EngineResult<PayrollLineResult> {
    compute_payroll_line_with_policy(
        salary,
        status,
        contributions,
        brackets,
        PayrollPolicy::default(),
    )
}

/// Computes a payroll line for one employee and one period.
///
/// Every employee-side contribution (health, JHT, JP, and any employee
/// share configured for JKK/JKM) is summed. Withholding is computed on the
/// full gross salary; contributions are not deducted before it.
///
/// `net_pay = salary - total_employee_contribution - withheld_tax`, then
/// the policy decides what a negative result means.
///
/// # Arguments
///
/// * `salary` - Gross monthly salary, must not be negative
/// * `status` - The employee's filing status
/// * `contributions` - The contribution rate table
/// * `brackets` - The withholding bracket table
/// * `policy` - Rounding and negative net pay handling
///
/// # Returns
///
/// The payroll line, or an error if:
/// - the salary is negative (`InvalidInput`)
/// - net pay is negative under `NegativeNetPay::Reject` (`NegativeNetPay`)
pub fn compute_payroll_line_with_policy(
    salary: Decimal,
    status: TaxFilingStatus,
    contributions: &ContributionRateTable,
    brackets: &WithholdingBracketTable,
    policy: PayrollPolicy,
) -> EngineResult<PayrollLineResult> {
    let health = round_contributions(
        calculate_health_contribution(salary, contributions)?,
        policy.rounding,
    );
    let employment_security = round_contributions(
        calculate_employment_security_contribution(salary, contributions)?,
        policy.rounding,
    );

    let total_employee_contribution =
        health.total_employee() + employment_security.total_employee();
    let total_employer_contribution =
        health.total_company() + employment_security.total_company();

    let withholding = calculate_withholding_detail(salary, status, brackets)?;
    let withheld_tax = round_amount(withholding.amount, policy.rounding);

    let net_pay = salary - total_employee_contribution - withheld_tax;
    let net_pay = if net_pay < Decimal::ZERO {
        match policy.negative_net_pay {
            NegativeNetPay::PassThrough => net_pay,
            NegativeNetPay::ClampToZero => Decimal::ZERO,
            NegativeNetPay::Reject => return Err(EngineError::NegativeNetPay { net_pay }),
        }
    } else {
        net_pay
    };

    Ok(PayrollLineResult {
        gross_salary: salary,
        total_employee_contribution,
        withheld_tax,
        net_pay,
        breakdown: DeductionBreakdown {
            health,
            employment_security,
            total_employer_contribution,
            tax_category: withholding.category,
            withholding_rate: withholding.bracket.rate,
        },
    })
}

fn round_amount(amount: Decimal, rounding: Rounding) -> Decimal {
    match rounding {
        Rounding::Exact => amount,
        Rounding::WholeUnit => {
            amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
    }
}

fn round_contributions(result: ContributionResult, rounding: Rounding) -> ContributionResult {
    if rounding == Rounding::Exact {
        return result;
    }
    let mut rounded = ContributionResult::default();
    for (scheme, split) in result.iter() {
        rounded.insert(
            *scheme,
            ContributionSplit {
                company: round_amount(split.company, rounding),
                employee: round_amount(split.employee, rounding),
            },
        );
    }
    rounded
}
