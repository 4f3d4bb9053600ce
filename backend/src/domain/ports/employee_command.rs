//! Driving port for employee mutations.

use async_trait::async_trait;

use crate::domain::{CreateEmployeeRequest, Employee, Error};

/// Write-side employee operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Create an employee in the backend.
    async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee, Error>;

    /// Delete the employee with the given raw identifier, returning its name.
    async fn delete_employee(&self, id: &str) -> Result<String, Error>;
}
