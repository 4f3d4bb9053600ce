//! Driven port for the remote employee store.
//!
//! The backend owns the data; this service only reads and forwards mutations.
//! Every call is a single attempt. Any decoded response comes back as a
//! [`BackendResult`], while throttling and transport problems surface as a
//! typed [`EmployeeGatewayError`] so the domain can tell "retry later" apart
//! from "the backend is broken".

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::{CreateEmployeeRequest, DeleteEmployeeRequest, EmployeeId};

/// Backend-reported processing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// The backend processed the request.
    Handled,
    /// The backend reported an error.
    Error,
}

/// Tri-state backend envelope.
///
/// When [`BackendResult::error`] is set the payload must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResult<T> {
    data: Option<T>,
    status: Option<BackendStatus>,
    error: Option<String>,
}

impl<T> BackendResult<T> {
    /// Assemble a result from its raw parts.
    pub fn new(data: Option<T>, status: Option<BackendStatus>, error: Option<String>) -> Self {
        Self {
            data,
            status,
            error,
        }
    }

    /// Successful result carrying `data`.
    pub fn handled(data: T) -> Self {
        Self::new(Some(data), Some(BackendStatus::Handled), None)
    }

    /// Failed result carrying the backend's error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::new(None, Some(BackendStatus::Error), Some(error.into()))
    }

    /// Result with neither data nor error.
    pub fn empty() -> Self {
        Self::new(None, None, None)
    }

    /// Payload, if the backend returned one.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Envelope status, if the backend reported one.
    pub fn status(&self) -> Option<BackendStatus> {
        self.status
    }

    /// Backend error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Split into `(data, error)`.
    pub fn into_parts(self) -> (Option<T>, Option<String>) {
        (self.data, self.error)
    }
}

/// Employee record in the backend's own shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: Uuid,
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
    pub email: String,
}

define_port_error! {
    /// Failures raised by the gateway instead of a decoded envelope.
    pub enum EmployeeGatewayError {
        /// The backend answered with "too many requests".
        RateLimited { message: String } =>
            "employee backend rate limited request: {message}",
        /// The request never produced a response.
        Transport { message: String } =>
            "employee backend transport failed: {message}",
        /// The configured request timeout elapsed.
        Timeout { message: String } =>
            "employee backend timeout: {message}",
        /// A response arrived but could not be decoded.
        Decode { message: String } =>
            "employee backend response decode failed: {message}",
    }
}

impl EmployeeGatewayError {
    /// Whether the failure is the backend throttling this service.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Port for calling the remote employee store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeGateway: Send + Sync {
    /// Fetch the full employee collection.
    async fn list_all(&self) -> Result<BackendResult<Vec<EmployeeRecord>>, EmployeeGatewayError>;

    /// Fetch one employee by identifier.
    async fn fetch_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError>;

    /// Create an employee, returning the backend's record.
    async fn create(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError>;

    /// Delete the employee with the given name.
    async fn delete_by_name(
        &self,
        request: &DeleteEmployeeRequest,
    ) -> Result<BackendResult<bool>, EmployeeGatewayError>;
}
