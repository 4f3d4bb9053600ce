//! Employee data model and input validation.
//!
//! [`Employee`] is the service-facing record handed to API clients.
//! [`CreateEmployeeRequest`] and [`DeleteEmployeeRequest`] can only be built
//! through their validating constructors, so the domain never forwards
//! unchecked input to the backend.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Length of the canonical hyphenated UUID form.
const CANONICAL_UUID_LEN: usize = 36;

/// Accepted employee ages, inclusive.
pub const EMPLOYEE_AGE_RANGE: RangeInclusive<i64> = 16..=75;

/// Returned by [`parse_identifier`] for anything other than a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("id: {raw} is not a valid UUID")]
pub struct InvalidIdentifier {
    raw: String,
}

impl InvalidIdentifier {
    /// The rejected input.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }
}

/// Validated employee key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Parse the canonical hyphenated textual form.
    ///
    /// Simple, braced and URN spellings are rejected even though they encode a
    /// UUID, as is surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::EmployeeId;
    ///
    /// assert!(EmployeeId::parse("2c5e68c4-587c-4d19-a581-549314f5918f").is_ok());
    /// assert!(EmployeeId::parse("not-a-uuid").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        let invalid = || InvalidIdentifier {
            raw: raw.to_owned(),
        };
        if raw.len() != CANONICAL_UUID_LEN {
            return Err(invalid());
        }
        Uuid::try_parse(raw).map(Self).map_err(|_| invalid())
    }

    /// Wrap an already-typed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Classify `raw` as a well-formed employee key.
pub fn parse_identifier(raw: &str) -> Result<EmployeeId, InvalidIdentifier> {
    EmployeeId::parse(raw)
}

/// Employee as exposed by the service.
///
/// Serialised as `{ id, name, salary, age, title, email }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    id: EmployeeId,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = 120000)]
    salary: u32,
    #[schema(example = 36)]
    age: u32,
    #[schema(example = "Analyst")]
    title: String,
    #[schema(example = "ada@company.com")]
    email: String,
}

impl Employee {
    /// Assemble an employee from already-trusted parts.
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        salary: u32,
        age: u32,
        title: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
            age,
            title: title.into(),
            email: email.into(),
        }
    }

    /// Backend identifier.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Annual salary.
    pub fn salary(&self) -> u32 {
        self.salary
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Job title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Work email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Validation failures for employee mutation requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    #[error("name must not be blank")]
    BlankName,
    #[error("salary must be a positive integer")]
    NonPositiveSalary,
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: i64, max: i64 },
    #[error("title must not be blank")]
    BlankTitle,
}

impl EmployeeValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::NonPositiveSalary => "salary",
            Self::AgeOutOfRange { .. } => "age",
            Self::BlankTitle => "title",
        }
    }
}

/// Validated payload for creating an employee in the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    name: String,
    salary: u32,
    age: u32,
    title: String,
}

impl CreateEmployeeRequest {
    /// Validate raw inputs.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::{CreateEmployeeRequest, EmployeeValidationError};
    ///
    /// let request = CreateEmployeeRequest::try_new("Grace", 180, 44, "Engineer").unwrap();
    /// assert_eq!(request.salary(), 180);
    ///
    /// let err = CreateEmployeeRequest::try_new("Grace", 180, 90, "Engineer").unwrap_err();
    /// assert_eq!(err, EmployeeValidationError::AgeOutOfRange { min: 16, max: 75 });
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        salary: i64,
        age: i64,
        title: impl Into<String>,
    ) -> Result<Self, EmployeeValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankName);
        }
        let salary = u32::try_from(salary)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(EmployeeValidationError::NonPositiveSalary)?;
        if !EMPLOYEE_AGE_RANGE.contains(&age) {
            return Err(EmployeeValidationError::AgeOutOfRange {
                min: *EMPLOYEE_AGE_RANGE.start(),
                max: *EMPLOYEE_AGE_RANGE.end(),
            });
        }
        let age = u32::try_from(age).map_err(|_| EmployeeValidationError::AgeOutOfRange {
            min: *EMPLOYEE_AGE_RANGE.start(),
            max: *EMPLOYEE_AGE_RANGE.end(),
        })?;
        let title = title.into();
        if title.trim().is_empty() {
            return Err(EmployeeValidationError::BlankTitle);
        }
        Ok(Self {
            name,
            salary,
            age,
            title,
        })
    }

    /// Requested name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested salary.
    pub fn salary(&self) -> u32 {
        self.salary
    }

    /// Requested age.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Requested title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Validated payload for deleting an employee.
///
/// The backend deletes by name, so callers resolve the name from an id first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEmployeeRequest {
    name: String,
}

impl DeleteEmployeeRequest {
    /// Validate the name to delete.
    pub fn try_new(name: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankName);
        }
        Ok(Self { name })
    }

    /// Name to delete.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Consume the request, returning the name.
    pub fn into_name(self) -> String {
        self.name
    }
}
