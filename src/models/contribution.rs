//! Contribution result models.
//!
//! A [`ContributionResult`] maps each BPJS scheme touched by a calculation
//! to the company and employee shares computed for it.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A statutory contribution scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionScheme {
    /// BPJS Kesehatan health insurance.
    Health,
    /// Jaminan Kecelakaan Kerja, workplace accident insurance.
    Jkk,
    /// Jaminan Kematian, death benefit.
    Jkm,
    /// Jaminan Hari Tua, old-age savings.
    Jht,
    /// Jaminan Pensiun, pension.
    Jp,
}

impl ContributionScheme {
    /// Every scheme a rate table must configure.
    pub const ALL: [ContributionScheme; 5] =
        [Self::Health, Self::Jkk, Self::Jkm, Self::Jht, Self::Jp];

    /// The four BPJS Ketenagakerjaan sub-schemes.
    pub const EMPLOYMENT_SECURITY: [ContributionScheme; 4] =
        [Self::Jkk, Self::Jkm, Self::Jht, Self::Jp];

    /// Returns the configuration key for this scheme.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Jkk => "jkk",
            Self::Jkm => "jkm",
            Self::Jht => "jht",
            Self::Jp => "jp",
        }
    }
}

impl fmt::Display for ContributionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The company and employee shares of a single scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionSplit {
    /// The share paid by the employer.
    pub company: Decimal,
    /// The share withheld from the employee's pay.
    pub employee: Decimal,
}

impl ContributionSplit {
    /// Returns the combined company and employee amount.
    pub fn total(&self) -> Decimal {
        self.company + self.employee
    }
}

/// Contributions per scheme for one salary.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ContributionResult, ContributionScheme, ContributionSplit};
/// use rust_decimal::Decimal;
///
/// let mut result = ContributionResult::default();
/// result.insert(
///     ContributionScheme::Health,
///     ContributionSplit {
///         company: Decimal::new(480_000, 0),
///         employee: Decimal::new(120_000, 0),
///     },
/// );
/// assert_eq!(result.total_employee(), Decimal::new(120_000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionResult {
    schemes: BTreeMap<ContributionScheme, ContributionSplit>,
}

impl ContributionResult {
    /// Records the split for a scheme, replacing any previous value.
    pub fn insert(&mut self, scheme: ContributionScheme, split: ContributionSplit) {
        self.schemes.insert(scheme, split);
    }

    /// Returns the split for a scheme, if it was calculated.
    pub fn get(&self, scheme: ContributionScheme) -> Option<&ContributionSplit> {
        self.schemes.get(&scheme)
    }

    /// Iterates over the calculated schemes in scheme order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContributionScheme, &ContributionSplit)> {
        self.schemes.iter()
    }

    /// Returns the sum of every employer share.
    pub fn total_company(&self) -> Decimal {
        self.schemes.values().map(|s| s.company).sum()
    }

    /// Returns the sum of every employee share.
    pub fn total_employee(&self) -> Decimal {
        self.schemes.values().map(|s| s.employee).sum()
    }

    fn company_of(&self, scheme: ContributionScheme) -> Decimal {
        self.get(scheme).map_or(Decimal::ZERO, |s| s.company)
    }

    fn employee_of(&self, scheme: ContributionScheme) -> Decimal {
        self.get(scheme).map_or(Decimal::ZERO, |s| s.employee)
    }

    /// Health contribution paid by the employer.
    pub fn health_company(&self) -> Decimal {
        self.company_of(ContributionScheme::Health)
    }

    /// Health contribution withheld from the employee.
    pub fn health_employee(&self) -> Decimal {
        self.employee_of(ContributionScheme::Health)
    }

    /// Workplace accident contribution (employer-paid).
    pub fn jkk(&self) -> Decimal {
        self.get(ContributionScheme::Jkk)
            .map_or(Decimal::ZERO, ContributionSplit::total)
    }

    /// Death benefit contribution (employer-paid).
    pub fn jkm(&self) -> Decimal {
        self.get(ContributionScheme::Jkm)
            .map_or(Decimal::ZERO, ContributionSplit::total)
    }

    /// Old-age savings paid by the employer.
    pub fn jht_company(&self) -> Decimal {
        self.company_of(ContributionScheme::Jht)
    }

    /// Old-age savings withheld from the employee.
    pub fn jht_employee(&self) -> Decimal {
        self.employee_of(ContributionScheme::Jht)
    }

    /// Pension paid by the employer.
    pub fn jp_company(&self) -> Decimal {
        self.company_of(ContributionScheme::Jp)
    }

    /// Pension withheld from the employee.
    pub fn jp_employee(&self) -> Decimal {
        self.employee_of(ContributionScheme::Jp)
    }
}
