//! Employee storage.
//!
//! The engine never reads employee data from a global; callers hand an
//! [`EmployeeRepository`] to whatever needs it. [`InMemoryEmployeeRepository`]
//! is the implementation the HTTP server uses.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Source of employee records for payroll runs.
pub trait EmployeeRepository: Send + Sync {
    /// Returns every employee in insertion order.
    fn list(&self) -> EngineResult<Vec<Employee>>;

    /// Returns the employee with the given ID.
    fn get(&self, id: &str) -> EngineResult<Employee>;

    /// Adds an employee. Fails with `DuplicateEmployee` if the ID exists.
    fn add(&self, employee: Employee) -> EngineResult<()>;
}

/// An [`EmployeeRepository`] held in process memory.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, TaxFilingStatus};
/// use payroll_engine::repository::{EmployeeRepository, InMemoryEmployeeRepository};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let repo = InMemoryEmployeeRepository::default();
/// repo.add(Employee {
///     id: "EMP001".to_string(),
///     name: "Budi Santoso".to_string(),
///     department: "Engineering".to_string(),
///     position: "Senior Developer".to_string(),
///     salary: Decimal::new(15_000_000, 0),
///     bank_account: "1234567890".to_string(),
///     tax_status: TaxFilingStatus::K1,
///     join_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
/// })
/// .unwrap();
/// assert_eq!(repo.list().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Creates a repository seeded with employees.
    ///
    /// Fails with `DuplicateEmployee` if two seeds share an ID.
    pub fn with_employees(employees: Vec<Employee>) -> EngineResult<Self> {
        let repo = Self::default();
        for employee in employees {
            repo.add(employee)?;
        }
        Ok(repo)
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Vec<Employee>>> {
        self.employees.read().map_err(|_| EngineError::LockPoisoned {
            resource: "employee store".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Vec<Employee>>> {
        self.employees.write().map_err(|_| EngineError::LockPoisoned {
            resource: "employee store".to_string(),
        })
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn list(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> EngineResult<Employee> {
        self.read()?
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn add(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.write()?;
        if employees.iter().any(|e| e.id == employee.id) {
            return Err(EngineError::DuplicateEmployee { id: employee.id });
        }
        debug!(employee_id = %employee.id, "Adding employee");
        employees.push(employee);
        Ok(())
    }
}
