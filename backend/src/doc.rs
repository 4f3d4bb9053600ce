//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (employees, health)
//! - **Schemas**: the employee record, the create payload, and the shared
//!   error body
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Employee, Error, ErrorCode};
use crate::inbound::http::employees::CreateEmployeeBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee API",
        description = "Cached façade over the employee backend, with health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::search_employees,
        crate::inbound::http::employees::highest_salary,
        crate::inbound::http::employees::top_ten_highest_earning_employee_names,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Employee, CreateEmployeeBody, Error, ErrorCode)),
    tags(
        (name = "employees", description = "Employee reads, aggregates, and mutations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
