//! PPh 21 withholding calculation using average effective rates (TER).
//!
//! The filing status selects a category, the category selects a bracket
//! sequence, and the bracket containing the gross income supplies a single
//! rate that is applied to the whole gross income. This is a flat rate on
//! the full amount, not a marginal rate on the slice above the lower bound.

use rust_decimal::Decimal;

use crate::config::{WithholdingBracket, WithholdingBracketTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{TaxCategory, TaxFilingStatus};

use super::ensure_non_negative;

/// The result of a withholding calculation, including the bracket applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithholdingResult {
    /// The category the filing status resolved to.
    pub category: TaxCategory,
    /// The bracket containing the gross income.
    pub bracket: WithholdingBracket,
    /// The amount withheld.
    pub amount: Decimal,
}

/// Maps a filing status to its TER category.
///
/// - A: TK/0, K/0
/// - B: K/1, K/2
/// - C: K/3
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::classify_category;
/// use payroll_engine::models::{TaxCategory, TaxFilingStatus};
///
/// assert_eq!(classify_category(TaxFilingStatus::K1), TaxCategory::B);
/// ```
pub fn classify_category(status: TaxFilingStatus) -> TaxCategory {
    match status {
        TaxFilingStatus::Tk0 | TaxFilingStatus::K0 => TaxCategory::A,
        TaxFilingStatus::K1 | TaxFilingStatus::K2 => TaxCategory::B,
        TaxFilingStatus::K3 => TaxCategory::C,
    }
}

/// Maps a raw filing status code (e.g. `"K/1"`) to its TER category.
///
/// Returns `UnknownTaxStatus` for any code outside the recognised set,
/// including `TK/1`, `TK/2` and `TK/3`.
pub fn classify_status_code(code: &str) -> EngineResult<TaxCategory> {
    let status: TaxFilingStatus = code.parse()?;
    Ok(classify_category(status))
}

/// Calculates withholding and reports the category and bracket used.
///
/// # Arguments
///
/// * `gross_income` - Gross monthly income, must not be negative
/// * `status` - The employee's filing status
/// * `table` - The withholding bracket table
///
/// # Returns
///
/// The withheld amount with its category and bracket, or an error if:
/// - `gross_income` is negative (`InvalidInput`)
/// - the table has no bracket containing the income (`InvalidConfiguration`),
///   which a validated table rules out
pub fn calculate_withholding_detail(
    gross_income: Decimal,
    status: TaxFilingStatus,
    table: &WithholdingBracketTable,
) -> EngineResult<WithholdingResult> {
    ensure_non_negative("gross_income", gross_income)?;

    let category = classify_category(status);
    let bracket = table
        .brackets(category)?
        .iter()
        .find(|b| b.contains(gross_income))
        .copied()
        .ok_or_else(|| EngineError::InvalidConfiguration {
            message: format!(
                "category {}: no bracket contains income {}",
                category, gross_income
            ),
        })?;

    Ok(WithholdingResult {
        category,
        bracket,
        amount: gross_income * bracket.rate,
    })
}

/// Calculates the PPh 21 amount withheld from a gross monthly income.
///
/// A value exactly on a bracket boundary belongs to the bracket that
/// starts there: 5,400,000 is taxed at 0.25%, 5,399,999 at 0%.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::TaxFilingStatus;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let withheld = calculate_withholding(
///     Decimal::new(12_000_000, 0),
///     TaxFilingStatus::Tk0,
///     loader.withholding(),
/// )
/// .unwrap();
/// assert_eq!(withheld, Decimal::new(600_000, 0));
/// ```
pub fn calculate_withholding(
    gross_income: Decimal,
    status: TaxFilingStatus,
    table: &WithholdingBracketTable,
) -> EngineResult<Decimal> {
    calculate_withholding_detail(gross_income, status, table).map(|r| r.amount)
}
