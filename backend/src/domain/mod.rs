//! Domain primitives, caches, and services.
//!
//! Purpose: define the employee model, the read-through cache core, and the
//! service that ties them to the backend gateway port. Types here are
//! transport agnostic; HTTP and outbound concerns live in `inbound` and
//! `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and stable identifiers.
//! - Employee, EmployeeId, CreateEmployeeRequest, DeleteEmployeeRequest.
//! - EmployeeCaches, CacheSlot, SearchCache: read-through caches.
//! - EmployeeService: implementation of the driving ports.

pub mod aggregation;
pub mod cache;
pub mod employee;
pub mod employee_service;
pub mod error;
pub mod mapper;
pub mod ports;
pub mod trace_id;

pub use self::aggregation::{TOP_EARNERS_LIMIT, highest_salary, top_ten_by_salary};
pub use self::cache::{CacheSlot, EmployeeCaches, SearchCache, normalise_search_term};
pub use self::employee::{
    CreateEmployeeRequest, DeleteEmployeeRequest, EMPLOYEE_AGE_RANGE, Employee, EmployeeId,
    EmployeeValidationError, InvalidIdentifier, parse_identifier,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode};
pub use self::mapper::map_records;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
