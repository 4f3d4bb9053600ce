//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; outbound adapters never construct them directly but surface
//! typed port errors that the domain services translate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller input is malformed; detected before any backend call.
    InvalidInput,
    /// The request was valid but the employee does not exist.
    EmployeeNotFound,
    /// An aggregate was requested over an empty collection.
    NoEmployeesFound,
    /// The employee backend reported an error or could not be reached.
    BackendFailure,
    /// The employee backend throttled the request.
    RateLimited,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Domain error payload.
///
/// The current [`TraceId`] is captured on construction so adapters can
/// correlate the failure with request logs.
///
/// # Examples
/// ```
/// use employee_api::domain::{Error, ErrorCode};
///
/// let err = Error::employee_not_found("missing");
/// assert_eq!(err.code(), ErrorCode::EmployeeNotFound);
/// assert_eq!(err.message(), "missing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_input")]
    code: ErrorCode,
    #[schema(example = "id: abc is not a valid UUID")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error tagged with the trace identifier in scope, if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach an explicit trace identifier.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Re-tag the error with the trace identifier in scope, if any.
    ///
    /// A failure shared between coalesced callers is raised under one
    /// request's trace id; each caller re-tags its own copy.
    pub fn with_current_trace_id(self) -> Self {
        match TraceId::current() {
            Some(id) => self.with_trace_id(id.to_string()),
            None => self,
        }
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_input("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorCode::EmployeeNotFound`].
    pub fn employee_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmployeeNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::NoEmployeesFound`].
    pub fn no_employees_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoEmployeesFound, message)
    }

    /// Convenience constructor for [`ErrorCode::BackendFailure`].
    pub fn backend_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BackendFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
