//! Employee HTTP handlers.
//!
//! ```text
//! GET    /employees
//! GET    /employees/search/{term}
//! GET    /employees/highestSalary
//! GET    /employees/topTenHighestEarningEmployeeNames
//! GET    /employees/{id}
//! POST   /employees {"name":"Jill Jenkins","salary":139082,"age":48,"title":"Financial Advisor"}
//! DELETE /employees/{id}
//! ```
//!
//! The fixed `GET` routes must be registered before `/employees/{id}`; use
//! [`configure`] rather than adding the services by hand.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateEmployeeRequest, Employee, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, employee_validation_error, require};

/// Request payload for `POST /employees`.
///
/// Fields are optional at the wire level so a missing field is reported as a
/// validation failure naming it, rather than as a decode error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeBody {
    #[schema(example = "Jill Jenkins")]
    pub name: Option<String>,
    #[schema(example = 139082, minimum = 1)]
    pub salary: Option<i64>,
    #[schema(example = 48, minimum = 16, maximum = 75)]
    pub age: Option<i64>,
    #[schema(example = "Financial Advisor")]
    pub title: Option<String>,
}

impl TryFrom<CreateEmployeeBody> for CreateEmployeeRequest {
    type Error = Error;

    fn try_from(body: CreateEmployeeBody) -> Result<Self, Self::Error> {
        let name = require(body.name, FieldName::new("name"))?;
        let salary = require(body.salary, FieldName::new("salary"))?;
        let age = require(body.age, FieldName::new("age"))?;
        let title = require(body.title, FieldName::new("title"))?;
        CreateEmployeeRequest::try_new(name, salary, age, title).map_err(employee_validation_error)
    }
}

/// Register the employee routes in matching order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_employees)
        .service(search_employees)
        .service(highest_salary)
        .service(top_ten_highest_earning_employee_names)
        .service(get_employee)
        .service(create_employee)
        .service(delete_employee);
}

/// List every employee.
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 429, description = "Backend rate limited the request", body = Error),
        (status = 500, description = "Backend failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees.all_employees().await?;
    Ok(web::Json(employees))
}

/// Employees whose name contains the search term, ignoring case.
#[utoipa::path(
    get,
    path = "/employees/search/{term}",
    params(("term" = String, Path, description = "Name fragment to search for")),
    responses(
        (status = 200, description = "Matching employees", body = [Employee]),
        (status = 400, description = "Blank search term", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error),
        (status = 500, description = "Backend failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "searchEmployees"
)]
#[get("/employees/search/{term}")]
pub async fn search_employees(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Employee>>> {
    let term = path.into_inner();
    let employees = state.employees.search_employees(&term).await?;
    Ok(web::Json(employees))
}

/// Highest salary across all employees.
#[utoipa::path(
    get,
    path = "/employees/highestSalary",
    responses(
        (status = 200, description = "Highest salary", body = u32),
        (status = 404, description = "No employees found", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error)
    ),
    tags = ["employees"],
    operation_id = "highestSalary"
)]
#[get("/employees/highestSalary")]
pub async fn highest_salary(state: web::Data<HttpState>) -> ApiResult<web::Json<u32>> {
    let salary = state.employees.highest_salary().await?;
    Ok(web::Json(salary))
}

/// Names of the ten best-paid employees, best-paid first.
#[utoipa::path(
    get,
    path = "/employees/topTenHighestEarningEmployeeNames",
    responses(
        (status = 200, description = "Top earner names", body = [String]),
        (status = 404, description = "No employees found", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error)
    ),
    tags = ["employees"],
    operation_id = "topTenHighestEarningEmployeeNames"
)]
#[get("/employees/topTenHighestEarningEmployeeNames")]
pub async fn top_ten_highest_earning_employee_names(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<String>>> {
    let names = state.employees.top_ten_highest_earning_names().await?;
    Ok(web::Json(names))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Canonical employee UUID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error),
        (status = 500, description = "Backend failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let id = path.into_inner();
    let employee = state.employees.employee_by_id(&id).await?;
    Ok(web::Json(employee))
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployeeBody,
    responses(
        (status = 200, description = "Created employee", body = Employee),
        (status = 400, description = "Invalid request", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error),
        (status = 500, description = "Backend failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEmployeeBody>,
) -> ApiResult<web::Json<Employee>> {
    let request = CreateEmployeeRequest::try_from(payload.into_inner())?;
    let employee = state.employee_commands.create_employee(request).await?;
    Ok(web::Json(employee))
}

/// Delete an employee, returning its name.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Canonical employee UUID")),
    responses(
        (status = 200, description = "Name of the deleted employee", body = String),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 429, description = "Backend rate limited the request", body = Error),
        (status = 500, description = "Backend failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<String>> {
    let id = path.into_inner();
    let name = state.employee_commands.delete_employee(&id).await?;
    Ok(web::Json(name))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
