//! Batch payroll runs over a set of employees.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollRun, PayrollTotals, Payslip};

use super::{compute_payroll_line_with_policy, trace_payroll_line};

/// Runs payroll for every employee in one period.
///
/// Each employee's line is computed independently against the same
/// configuration snapshot, using the policy from the regime metadata.
/// Payslips keep the input order and the totals cover every payslip.
///
/// # Arguments
///
/// * `employees` - The employees to pay
/// * `period` - The month being paid
/// * `config` - The payroll configuration
///
/// # Returns
///
/// The completed run, or an error if:
/// - the period is invalid (`InvalidInput`)
/// - any employee's line fails (`EmployeeCalculation`, wrapping the cause);
///   no partial run is returned
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::run_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayPeriod;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let period = PayPeriod::new(2024, 7).unwrap();
/// let run = run_payroll(&[], period, loader.config()).unwrap();
/// assert_eq!(run.totals.employee_count, 0);
/// ```
pub fn run_payroll(
    employees: &[Employee],
    period: PayPeriod,
    config: &PayrollConfig,
) -> EngineResult<PayrollRun> {
    period.validate()?;

    let run_id = Uuid::new_v4();
    let policy = config.policy();
    let started = Instant::now();

    let mut payslips = Vec::with_capacity(employees.len());
    let mut totals = PayrollTotals::default();

    for employee in employees {
        let line_started = Instant::now();
        let line = compute_payroll_line_with_policy(
            employee.salary,
            employee.tax_status,
            config.contributions(),
            config.withholding(),
            policy,
        )
        .map_err(|source| EngineError::EmployeeCalculation {
            employee_id: employee.id.clone(),
            source: Box::new(source),
        })?;

        let mut audit_trace = trace_payroll_line(employee.tax_status, &line);
        audit_trace.duration_us = line_started.elapsed().as_micros() as u64;

        debug!(
            run_id = %run_id,
            employee_id = %employee.id,
            net_pay = %line.net_pay,
            "Computed payroll line"
        );

        totals.add_line(&line);
        payslips.push(Payslip {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            bank_account: employee.bank_account.clone(),
            tax_status: employee.tax_status,
            line,
            audit_trace,
        });
    }

    info!(
        run_id = %run_id,
        period = %period,
        employee_count = totals.employee_count,
        net_pay = %totals.net_pay,
        duration_us = started.elapsed().as_micros() as u64,
        "Payroll run completed"
    );

    Ok(PayrollRun {
        run_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        payslips,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::NEGATIVE_NET_PAY_WARNING;
    use crate::config::{NegativeNetPay, PayrollPolicy, Rounding};
    use crate::models::TaxFilingStatus;
    use crate::test_support::{create_test_config, create_test_employee};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn july() -> PayPeriod {
        PayPeriod::new(2024, 7).unwrap()
    }

    #[test]
    fn test_run_produces_one_payslip_per_employee_in_order() {
        let config = create_test_config(PayrollPolicy::default());
        let employees = vec![
            create_test_employee("EMP001", "15000000", TaxFilingStatus::K1),
            create_test_employee("EMP002", "8000000", TaxFilingStatus::Tk0),
            create_test_employee("EMP003", "5000000", TaxFilingStatus::K3),
        ];

        let run = run_payroll(&employees, july(), &config).unwrap();

        let ids: Vec<&str> = run.payslips.iter().map(|p| p.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["EMP001", "EMP002", "EMP003"]);
        assert_eq!(run.period, july());
        assert_eq!(run.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_totals_sum_every_line() {
        let config = create_test_config(PayrollPolicy::default());
        let employees = vec![
            create_test_employee("EMP001", "15000000", TaxFilingStatus::K1),
            create_test_employee("EMP002", "8000000", TaxFilingStatus::Tk0),
        ];

        let run = run_payroll(&employees, july(), &config).unwrap();

        assert_eq!(run.totals.employee_count, 2);
        assert_eq!(run.totals.gross_salary, dec("23000000"));
        assert_eq!(run.totals.employee_contributions, dec("520479") + dec("320000"));
        assert_eq!(run.totals.withheld_tax, dec("1350000") + dec("100000"));
        assert_eq!(run.totals.net_pay, dec("13129521") + dec("7580000"));
    }

    #[test]
    fn test_payslip_carries_employee_details_and_trace() {
        let config = create_test_config(PayrollPolicy::default());
        let employees = vec![create_test_employee("EMP001", "15000000", TaxFilingStatus::K1)];

        let run = run_payroll(&employees, july(), &config).unwrap();
        let payslip = &run.payslips[0];

        assert_eq!(payslip.employee_name, "Employee EMP001");
        assert_eq!(payslip.bank_account, "ACC-EMP001");
        assert_eq!(payslip.tax_status, TaxFilingStatus::K1);
        assert_eq!(payslip.audit_trace.steps.len(), 5);
    }

    #[test]
    fn test_empty_workforce_yields_empty_run() {
        let config = create_test_config(PayrollPolicy::default());
        let run = run_payroll(&[], july(), &config).unwrap();

        assert!(run.payslips.is_empty());
        assert_eq!(run.totals, PayrollTotals::default());
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let config = create_test_config(PayrollPolicy::default());
        let period = PayPeriod {
            year: 2024,
            month: 13,
        };

        let err = run_payroll(&[], period, &config).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_failing_employee_fails_the_run_with_context() {
        let config = create_test_config(PayrollPolicy::default());
        let employees = vec![
            create_test_employee("EMP001", "15000000", TaxFilingStatus::K1),
            create_test_employee("EMP002", "-1", TaxFilingStatus::Tk0),
        ];

        match run_payroll(&employees, july(), &config) {
            Err(EngineError::EmployeeCalculation {
                employee_id,
                source,
            }) => {
                assert_eq!(employee_id, "EMP002");
                assert!(matches!(*source, EngineError::InvalidInput { .. }));
            }
            other => panic!("Expected EmployeeCalculation, got {:?}", other),
        }
    }

    #[test]
    fn test_run_uses_configured_policy() {
        let config = create_test_config(PayrollPolicy {
            negative_net_pay: NegativeNetPay::PassThrough,
            rounding: Rounding::WholeUnit,
        });
        let employees = vec![create_test_employee("EMP001", "5400001", TaxFilingStatus::Tk0)];

        let run = run_payroll(&employees, july(), &config).unwrap();

        assert_eq!(run.payslips[0].line.withheld_tax, dec("13500"));
    }

    #[test]
    fn test_no_warnings_for_ordinary_salaries() {
        let config = create_test_config(PayrollPolicy::default());
        let employees = vec![create_test_employee("EMP001", "8000000", TaxFilingStatus::Tk0)];

        let run = run_payroll(&employees, july(), &config).unwrap();

        assert!(
            !run.payslips[0]
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == NEGATIVE_NET_PAY_WARNING)
        );
    }

    #[test]
    fn test_each_run_has_a_fresh_id() {
        let config = create_test_config(PayrollPolicy::default());
        let first = run_payroll(&[], july(), &config).unwrap();
        let second = run_payroll(&[], july(), &config).unwrap();

        assert_ne!(first.run_id, second.run_id);
    }
}
