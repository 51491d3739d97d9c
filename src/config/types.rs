//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! tables the calculators read from.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionScheme, ContributionSplit, TaxCategory};

/// Metadata about the statutory regime a configuration implements.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeMetadata {
    /// A short code identifying the regime (e.g., "ID-2024").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the official regulation.
    pub source_url: String,
    /// How payroll lines are finalised.
    #[serde(default)]
    pub policy: PayrollPolicy,
}

/// What to do when deductions exceed gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeNetPay {
    /// Report the negative amount unchanged.
    #[default]
    PassThrough,
    /// Report zero net pay.
    ClampToZero,
    /// Fail the line with `NegativeNetPay`.
    Reject,
}

/// How computed amounts are rounded before netting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Keep exact decimal products.
    #[default]
    Exact,
    /// Round every contribution and the withholding to whole rupiah,
    /// half away from zero.
    WholeUnit,
}

/// Payroll finalisation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Treatment of negative net pay.
    #[serde(default)]
    pub negative_net_pay: NegativeNetPay,
    /// Rounding applied to deductions.
    #[serde(default)]
    pub rounding: Rounding,
}

/// Rates and cap for one contribution scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRate {
    /// Employer share as a fraction of the contribution base.
    pub company_rate: Decimal,
    /// Employee share as a fraction of the contribution base.
    #[serde(default)]
    pub employee_rate: Decimal,
    /// Salary ceiling for the contribution base. Zero or absent means uncapped.
    #[serde(default)]
    pub cap: Option<Decimal>,
}

impl SchemeRate {
    /// Returns the salary the rates apply to: the salary itself, or the cap
    /// when the salary exceeds a positive cap.
    pub fn contribution_base(&self, salary: Decimal) -> Decimal {
        match self.cap {
            Some(cap) if cap > Decimal::ZERO => salary.min(cap),
            _ => salary,
        }
    }

    /// Returns the combined company and employee rate.
    pub fn total_rate(&self) -> Decimal {
        self.company_rate + self.employee_rate
    }

    /// Splits the contribution on `salary` into company and employee shares.
    ///
    /// The cap is applied to the base before either rate.
    pub fn split(&self, salary: Decimal) -> ContributionSplit {
        let base = self.contribution_base(salary);
        ContributionSplit {
            company: base * self.company_rate,
            employee: base * self.employee_rate,
        }
    }
}

/// Contributions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Rates keyed by scheme.
    pub schemes: HashMap<ContributionScheme, SchemeRate>,
}

/// Validated contribution rates for every scheme.
///
/// Construction fails unless all five schemes are present with rates in
/// `[0, 1]` and non-negative caps, so calculators can look schemes up
/// without a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRateTable {
    schemes: HashMap<ContributionScheme, SchemeRate>,
}

impl ContributionRateTable {
    /// Builds a table, validating every scheme.
    pub fn new(schemes: HashMap<ContributionScheme, SchemeRate>) -> EngineResult<Self> {
        for scheme in ContributionScheme::ALL {
            let rate = schemes.get(&scheme).ok_or_else(|| EngineError::MissingScheme {
                scheme: scheme.to_string(),
            })?;
            validate_rate(&format!("{} company_rate", scheme), rate.company_rate)?;
            validate_rate(&format!("{} employee_rate", scheme), rate.employee_rate)?;
            if let Some(cap) = rate.cap {
                if cap < Decimal::ZERO {
                    return Err(EngineError::InvalidConfiguration {
                        message: format!("{} cap must not be negative, got {}", scheme, cap),
                    });
                }
            }
        }
        Ok(Self { schemes })
    }

    /// Returns the rate for a scheme.
    pub fn scheme(&self, scheme: ContributionScheme) -> EngineResult<&SchemeRate> {
        self.schemes
            .get(&scheme)
            .ok_or_else(|| EngineError::MissingScheme {
                scheme: scheme.to_string(),
            })
    }
}

/// One row of a withholding bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBracket {
    /// Inclusive lower bound of gross income.
    pub lower: Decimal,
    /// Exclusive upper bound; `None` on the last, open-ended bracket.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Rate applied to the full gross income.
    pub rate: Decimal,
}

impl WithholdingBracket {
    /// Returns true if `amount` lies in `[lower, upper)`.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.lower && self.upper.is_none_or(|upper| amount < upper)
    }
}

/// Withholding configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingConfig {
    /// Bracket sequences keyed by category.
    pub categories: HashMap<TaxCategory, Vec<WithholdingBracket>>,
}

/// Validated withholding brackets for every category.
///
/// Each category's brackets cover `[0, ∞)` exactly once: the first starts
/// at zero, each starts where the previous ends, and only the last is
/// open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithholdingBracketTable {
    categories: HashMap<TaxCategory, Vec<WithholdingBracket>>,
}

impl WithholdingBracketTable {
    /// Builds a table, validating coverage of every category.
    pub fn new(categories: HashMap<TaxCategory, Vec<WithholdingBracket>>) -> EngineResult<Self> {
        for category in TaxCategory::ALL {
            let brackets =
                categories
                    .get(&category)
                    .ok_or_else(|| EngineError::MissingTaxCategory {
                        category: category.to_string(),
                    })?;
            validate_brackets(category, brackets)?;
        }
        Ok(Self { categories })
    }

    /// Returns the bracket sequence for a category.
    pub fn brackets(&self, category: TaxCategory) -> EngineResult<&[WithholdingBracket]> {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::MissingTaxCategory {
                category: category.to_string(),
            })
    }
}

fn validate_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidConfiguration {
            message: format!("{} must be between 0 and 1, got {}", name, rate),
        });
    }
    Ok(())
}

fn validate_brackets(category: TaxCategory, brackets: &[WithholdingBracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidConfiguration {
        message: format!("category {}: {}", category, message),
    };

    let first = brackets
        .first()
        .ok_or_else(|| invalid("no brackets configured".to_string()))?;
    if first.lower != Decimal::ZERO {
        return Err(invalid(format!(
            "first bracket must start at 0, starts at {}",
            first.lower
        )));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(&format!("category {} bracket {} rate", category, index), bracket.rate)?;

        match bracket.upper {
            None if index != last_index => {
                return Err(invalid(format!(
                    "bracket {} is open-ended but is not the last bracket",
                    index
                )));
            }
            None => {}
            Some(_) if index == last_index => {
                return Err(invalid(
                    "last bracket must be open-ended to cover all income".to_string(),
                ));
            }
            Some(upper) => {
                if upper <= bracket.lower {
                    return Err(invalid(format!(
                        "bracket {} upper bound {} is not above lower bound {}",
                        index, upper, bracket.lower
                    )));
                }
                let next = &brackets[index + 1];
                if next.lower != upper {
                    return Err(invalid(format!(
                        "bracket {} starts at {} but the previous bracket ends at {}",
                        index + 1,
                        next.lower,
                        upper
                    )));
                }
            }
        }
    }
    Ok(())
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: RegimeMetadata,
    contributions: ContributionRateTable,
    withholding: WithholdingBracketTable,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: RegimeMetadata,
        contributions: ContributionRateTable,
        withholding: WithholdingBracketTable,
    ) -> Self {
        Self {
            metadata,
            contributions,
            withholding,
        }
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> PayrollPolicy {
        self.metadata.policy
    }

    /// Returns the contribution rate table.
    pub fn contributions(&self) -> &ContributionRateTable {
        &self.contributions
    }

    /// Returns the withholding bracket table.
    pub fn withholding(&self) -> &WithholdingBracketTable {
        &self.withholding
    }
}
