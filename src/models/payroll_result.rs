//! Payroll result models.
//!
//! This module contains the [`PayrollLineResult`] produced for one employee
//! and one period, the [`PayrollRun`] that groups lines for a whole
//! workforce, and the audit trace types that explain each line.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContributionResult, PayPeriod, TaxCategory, TaxFilingStatus};

/// The per-scheme detail behind a payroll line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// BPJS Kesehatan contributions.
    pub health: ContributionResult,
    /// BPJS Ketenagakerjaan contributions (JKK, JKM, JHT, JP).
    pub employment_security: ContributionResult,
    /// Sum of every employer-side contribution. Not deducted from pay.
    pub total_employer_contribution: Decimal,
    /// The TER category the filing status resolved to.
    pub tax_category: TaxCategory,
    /// The bracket rate applied to the full gross salary.
    pub withholding_rate: Decimal,
}

/// The payroll outcome for one employee in one period.
///
/// `net_pay` always equals
/// `gross_salary - total_employee_contribution - withheld_tax`
/// unless the line was computed under a clamping policy.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll_line;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::TaxFilingStatus;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let line = compute_payroll_line(
///     Decimal::new(8_000_000, 0),
///     TaxFilingStatus::Tk0,
///     loader.contributions(),
///     loader.withholding(),
/// )
/// .unwrap();
/// assert_eq!(
///     line.net_pay,
///     line.gross_salary - line.total_employee_contribution - line.withheld_tax
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLineResult {
    /// The gross monthly salary.
    pub gross_salary: Decimal,
    /// Sum of every employee-side contribution.
    pub total_employee_contribution: Decimal,
    /// PPh 21 withheld.
    pub withheld_tax: Decimal,
    /// The amount payable to the employee.
    pub net_pay: Decimal,
    /// How the deductions were made up.
    pub breakdown: DeductionBreakdown,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The regulation the rule implements.
    pub regulation_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag lines that were computed but need a human to look at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// One employee's entry in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// Where the net pay is transferred.
    pub bank_account: String,
    /// The filing status used for withholding.
    pub tax_status: TaxFilingStatus,
    /// The computed line.
    pub line: PayrollLineResult,
    /// How the line was computed.
    pub audit_trace: AuditTrace,
}

/// Aggregated totals across a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of payslips in the run.
    pub employee_count: usize,
    /// Sum of gross salaries.
    pub gross_salary: Decimal,
    /// Sum of employee-side contributions.
    pub employee_contributions: Decimal,
    /// Sum of employer-side contributions.
    pub employer_contributions: Decimal,
    /// Sum of PPh 21 withheld.
    pub withheld_tax: Decimal,
    /// Sum of net pay.
    pub net_pay: Decimal,
}

impl PayrollTotals {
    /// Adds one line to the running totals.
    pub fn add_line(&mut self, line: &PayrollLineResult) {
        self.employee_count += 1;
        self.gross_salary += line.gross_salary;
        self.employee_contributions += line.total_employee_contribution;
        self.employer_contributions += line.breakdown.total_employer_contribution;
        self.withheld_tax += line.withheld_tax;
        self.net_pay += line.net_pay;
    }
}

/// The result of running payroll for a set of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The month the run covers.
    pub period: PayPeriod,
    /// One payslip per employee, in input order.
    pub payslips: Vec<Payslip>,
    /// Totals across every payslip.
    pub totals: PayrollTotals,
}
