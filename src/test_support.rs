//! Shared fixtures for unit tests.
//!
//! The tables here mirror `config/idn` so unit tests do not depend on the
//! working directory.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{
    ContributionRateTable, PayrollConfig, PayrollPolicy, RegimeMetadata, SchemeRate,
    WithholdingBracket, WithholdingBracketTable,
};
use crate::models::{ContributionScheme, Employee, TaxCategory, TaxFilingStatus};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn rate(company: &str, employee: &str, cap: Option<&str>) -> SchemeRate {
    SchemeRate {
        company_rate: dec(company),
        employee_rate: dec(employee),
        cap: cap.map(dec),
    }
}

fn reference_schemes() -> HashMap<ContributionScheme, SchemeRate> {
    HashMap::from([
        (ContributionScheme::Health, rate("0.04", "0.01", Some("12000000"))),
        (ContributionScheme::Jkk, rate("0.0024", "0", None)),
        (ContributionScheme::Jkm, rate("0.003", "0", None)),
        (ContributionScheme::Jht, rate("0.037", "0.02", None)),
        (ContributionScheme::Jp, rate("0.02", "0.01", Some("10047900"))),
    ])
}

/// The reference contribution table.
pub fn create_test_contributions() -> ContributionRateTable {
    ContributionRateTable::new(reference_schemes()).unwrap()
}

/// The reference contribution table with one scheme replaced.
pub fn create_test_contributions_with(
    scheme: ContributionScheme,
    replacement: SchemeRate,
) -> ContributionRateTable {
    let mut schemes = reference_schemes();
    schemes.insert(scheme, replacement);
    ContributionRateTable::new(schemes).unwrap()
}

/// The reference bracket sequence shared by every category.
pub fn reference_brackets() -> Vec<WithholdingBracket> {
    let bounds = [
        ("0", Some("5400000"), "0"),
        ("5400000", Some("6500000"), "0.0025"),
        ("6500000", Some("7500000"), "0.0075"),
        ("7500000", Some("8500000"), "0.0125"),
        ("8500000", Some("10000000"), "0.02"),
        ("10000000", Some("15000000"), "0.05"),
        ("15000000", None, "0.09"),
    ];
    bounds
        .iter()
        .map(|(lower, upper, rate)| WithholdingBracket {
            lower: dec(lower),
            upper: upper.map(dec),
            rate: dec(rate),
        })
        .collect()
}

/// The reference withholding table.
pub fn create_test_withholding() -> WithholdingBracketTable {
    let categories = TaxCategory::ALL
        .iter()
        .map(|category| (*category, reference_brackets()))
        .collect();
    WithholdingBracketTable::new(categories).unwrap()
}

/// A full configuration built from the reference tables.
pub fn create_test_config(policy: PayrollPolicy) -> PayrollConfig {
    PayrollConfig::new(
        RegimeMetadata {
            code: "ID-TEST".to_string(),
            name: "Test regime".to_string(),
            version: "2024-01-01".to_string(),
            source_url: "https://example.invalid".to_string(),
            policy,
        },
        create_test_contributions(),
        create_test_withholding(),
    )
}

/// An employee with the given id, salary and filing status.
pub fn create_test_employee(id: &str, salary: &str, tax_status: TaxFilingStatus) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        department: "Engineering".to_string(),
        position: "Developer".to_string(),
        salary: dec(salary),
        bank_account: format!("ACC-{}", id),
        tax_status,
        join_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
    }
}
