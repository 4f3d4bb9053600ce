//! Wire DTOs for the employee backend.
//!
//! Responses are wrapped in a `{ data, status, error }` envelope and employee
//! fields carry an `employee_` prefix. The adapter decodes into these DTOs
//! first, then converts into port types in one pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::CreateEmployeeRequest;
use crate::domain::ports::{BackendResult, BackendStatus, EmployeeRecord};

#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<T> {
    pub(super) data: Option<T>,
    pub(super) status: Option<String>,
    pub(super) error: Option<String>,
}

impl<T> EnvelopeDto<T> {
    /// Fill in `error` when the backend left it out of a failed response.
    pub(super) fn with_default_error(mut self, message: impl FnOnce() -> String) -> Self {
        if self.error.is_none() {
            self.error = Some(message());
        }
        self
    }

    pub(super) fn into_backend_result<U>(self, convert: impl FnOnce(T) -> U) -> BackendResult<U> {
        let status = match (&self.error, &self.status) {
            (Some(_), _) => Some(BackendStatus::Error),
            (None, Some(_)) => Some(BackendStatus::Handled),
            (None, None) => None,
        };
        BackendResult::new(self.data.map(convert), status, self.error)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EmployeeRecordDto {
    id: Uuid,
    employee_name: String,
    employee_salary: u32,
    employee_age: u32,
    employee_title: String,
    employee_email: String,
}

impl From<EmployeeRecordDto> for EmployeeRecord {
    fn from(dto: EmployeeRecordDto) -> Self {
        Self {
            id: dto.id,
            name: dto.employee_name,
            salary: dto.employee_salary,
            age: dto.employee_age,
            title: dto.employee_title,
            email: dto.employee_email,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateEmployeeBody<'a> {
    name: &'a str,
    salary: u32,
    age: u32,
    title: &'a str,
}

impl<'a> From<&'a CreateEmployeeRequest> for CreateEmployeeBody<'a> {
    fn from(request: &'a CreateEmployeeRequest) -> Self {
        Self {
            name: request.name(),
            salary: request.salary(),
            age: request.age(),
            title: request.title(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteEmployeeBody<'a> {
    pub(super) name: &'a str,
}
