//! Audit trace construction for payroll lines.
//!
//! The calculators are pure and return plain values; this module derives a
//! step-by-step explanation from a finished [`PayrollLineResult`] so the
//! numbers on a payslip can be traced back to the rule that produced them.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditTrace, AuditWarning, PayrollLineResult, TaxFilingStatus};

/// Warning code attached to lines whose net pay is below zero.
pub const NEGATIVE_NET_PAY_WARNING: &str = "NEGATIVE_NET_PAY";

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Builds the audit trace for a computed payroll line.
///
/// The trace has five steps in calculation order: health contribution,
/// employment security contribution, tax category, withholding, and net
/// pay. A line with negative net pay also carries a
/// [`NEGATIVE_NET_PAY_WARNING`] warning. `duration_us` is left at zero for
/// the caller to fill in.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compute_payroll_line, trace_payroll_line};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::TaxFilingStatus;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let salary = Decimal::new(15_000_000, 0);
/// let line = compute_payroll_line(
///     salary,
///     TaxFilingStatus::K1,
///     loader.contributions(),
///     loader.withholding(),
/// )
/// .unwrap();
/// let trace = trace_payroll_line(TaxFilingStatus::K1, &line);
/// assert_eq!(trace.steps.len(), 5);
/// assert!(trace.warnings.is_empty());
/// ```
pub fn trace_payroll_line(status: TaxFilingStatus, line: &PayrollLineResult) -> AuditTrace {
    let breakdown = &line.breakdown;
    let health = &breakdown.health;
    let security = &breakdown.employment_security;
    let salary = line.gross_salary;

    let mut steps = Vec::with_capacity(5);

    steps.push(AuditStep {
        step_number: 1,
        rule_id: "health_contribution".to_string(),
        rule_name: "BPJS Kesehatan Contribution".to_string(),
        regulation_ref: "Perpres 82/2018".to_string(),
        input: serde_json::json!({
            "salary": amount(salary)
        }),
        output: serde_json::json!({
            "company": amount(health.health_company()),
            "employee": amount(health.health_employee())
        }),
        reasoning: format!(
            "Health on Rp{}: company Rp{}, employee Rp{}",
            amount(salary),
            amount(health.health_company()),
            amount(health.health_employee())
        ),
    });

    steps.push(AuditStep {
        step_number: 2,
        rule_id: "employment_security_contribution".to_string(),
        rule_name: "BPJS Ketenagakerjaan Contribution".to_string(),
        regulation_ref: "PP 44/2015, PP 45/2015, PP 46/2015".to_string(),
        input: serde_json::json!({
            "salary": amount(salary)
        }),
        output: serde_json::json!({
            "jkk": amount(security.jkk()),
            "jkm": amount(security.jkm()),
            "jht_company": amount(security.jht_company()),
            "jht_employee": amount(security.jht_employee()),
            "jp_company": amount(security.jp_company()),
            "jp_employee": amount(security.jp_employee())
        }),
        reasoning: format!(
            "Employee share: {} = Rp{}",
            security
                .iter()
                .map(|(scheme, split)| {
                    format!("{} Rp{}", scheme.key().to_uppercase(), amount(split.employee))
                })
                .collect::<Vec<_>>()
                .join(" + "),
            amount(security.total_employee())
        ),
    });

    steps.push(AuditStep {
        step_number: 3,
        rule_id: "tax_category".to_string(),
        rule_name: "TER Category".to_string(),
        regulation_ref: "PP 58/2023".to_string(),
        input: serde_json::json!({
            "tax_status": status.code()
        }),
        output: serde_json::json!({
            "category": breakdown.tax_category.to_string()
        }),
        reasoning: format!(
            "Filing status {} uses TER category {}",
            status, breakdown.tax_category
        ),
    });

    steps.push(AuditStep {
        step_number: 4,
        rule_id: "pph21_withholding".to_string(),
        rule_name: "PPh 21 Withholding".to_string(),
        regulation_ref: "PP 58/2023".to_string(),
        input: serde_json::json!({
            "gross_income": amount(salary),
            "category": breakdown.tax_category.to_string()
        }),
        output: serde_json::json!({
            "rate": amount(breakdown.withholding_rate),
            "withheld": amount(line.withheld_tax)
        }),
        reasoning: format!(
            "Rp{} x {} = Rp{}",
            amount(salary),
            amount(breakdown.withholding_rate),
            amount(line.withheld_tax)
        ),
    });

    steps.push(AuditStep {
        step_number: 5,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        regulation_ref: String::new(),
        input: serde_json::json!({
            "gross_salary": amount(salary),
            "total_employee_contribution": amount(line.total_employee_contribution),
            "withheld_tax": amount(line.withheld_tax)
        }),
        output: serde_json::json!({
            "net_pay": amount(line.net_pay)
        }),
        reasoning: format!(
            "Rp{} - Rp{} - Rp{} = Rp{}",
            amount(salary),
            amount(line.total_employee_contribution),
            amount(line.withheld_tax),
            amount(line.net_pay)
        ),
    });

    let mut warnings = Vec::new();
    if line.net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NEGATIVE_NET_PAY_WARNING.to_string(),
            message: format!(
                "Deductions exceed gross salary; net pay is Rp{}",
                amount(line.net_pay)
            ),
            severity: "high".to_string(),
        });
    }

    AuditTrace {
        steps,
        warnings,
        duration_us: 0,
    }
}
