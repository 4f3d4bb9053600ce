//! Driving port for read-side employee use-cases.
//!
//! HTTP handlers depend on this trait rather than on the service type, so
//! they can be exercised against a mock without any backend.

use async_trait::async_trait;

use crate::domain::{Employee, Error};

/// Read-side employee operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeQuery: Send + Sync {
    /// Every employee known to the backend.
    async fn all_employees(&self) -> Result<Vec<Employee>, Error>;

    /// Employees whose name contains `term`, ignoring case.
    async fn search_employees(&self, term: &str) -> Result<Vec<Employee>, Error>;

    /// One employee by its raw identifier; validated before any backend call.
    async fn employee_by_id(&self, id: &str) -> Result<Employee, Error>;

    /// Highest salary across all employees.
    async fn highest_salary(&self) -> Result<u32, Error>;

    /// Names of the ten best-paid employees, best-paid first.
    async fn top_ten_highest_earning_names(&self) -> Result<Vec<String>, Error>;
}
