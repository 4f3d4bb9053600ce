//! Employee service implementing the driving ports.
//!
//! Reads go through [`EmployeeCaches`]; id lookups and deletions invalidate
//! both caches before touching the backend. Creation leaves the cached
//! collection in place, so a freshly created employee becomes visible on the
//! next invalidation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    BackendResult, EmployeeCommand, EmployeeGateway, EmployeeGatewayError, EmployeeQuery,
};
use crate::domain::{
    CreateEmployeeRequest, DeleteEmployeeRequest, Employee, EmployeeCaches, EmployeeId, Error,
    aggregation, map_records, normalise_search_term, parse_identifier,
};

fn map_gateway_error(error: EmployeeGatewayError) -> Error {
    if error.is_rate_limited() {
        warn!(error = %error, "employee backend rate limited the request");
        Error::rate_limited(error.to_string())
    } else {
        warn!(error = %error, "employee backend call failed");
        Error::backend_failure(error.to_string())
    }
}

fn backend_error<T>(result: &BackendResult<T>) -> Option<Error> {
    result
        .error()
        .map(|message| Error::backend_failure(format!("employee backend error: {message}")))
}

fn validate_id(raw: &str) -> Result<EmployeeId, Error> {
    parse_identifier(raw).map_err(|err| Error::invalid_input(err.to_string()))
}

/// Employee service backed by a gateway and the shared caches.
pub struct EmployeeService<G: ?Sized> {
    gateway: Arc<G>,
    caches: Arc<EmployeeCaches>,
}

impl<G: ?Sized> Clone for EmployeeService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            caches: Arc::clone(&self.caches),
        }
    }
}

impl<G: ?Sized> EmployeeService<G> {
    /// Create a service over `gateway` using the given caches.
    pub fn new(gateway: Arc<G>, caches: Arc<EmployeeCaches>) -> Self {
        Self { gateway, caches }
    }

    /// Caches used by this service.
    pub fn caches(&self) -> &EmployeeCaches {
        &self.caches
    }
}

impl<G> EmployeeService<G>
where
    G: EmployeeGateway + ?Sized + 'static,
{
    async fn cached_collection(&self) -> Result<Arc<Vec<Employee>>, Error> {
        let gateway = Arc::clone(&self.gateway);
        self.caches
            .all()
            .get_or_populate(move || async move {
                let result = gateway.list_all().await.map_err(map_gateway_error)?;
                if let Some(err) = backend_error(&result) {
                    return Err(err);
                }
                let (records, _) = result.into_parts();
                records
                    .map(map_records)
                    .ok_or_else(|| Error::backend_failure("employee backend returned no data"))
            })
            .await
    }

    async fn fetch_employee(&self, id: &EmployeeId) -> Result<Employee, Error> {
        self.caches.invalidate_all();
        let result = self
            .gateway
            .fetch_by_id(id)
            .await
            .map_err(map_gateway_error)?;
        let error = backend_error(&result);
        let (record, _) = result.into_parts();
        let Some(record) = record else {
            return Err(Error::employee_not_found(format!(
                "Employee with id: {id} not found"
            )));
        };
        match error {
            Some(err) => Err(err),
            None => Ok(Employee::from(record)),
        }
    }
}

#[async_trait]
impl<G> EmployeeQuery for EmployeeService<G>
where
    G: EmployeeGateway + ?Sized + 'static,
{
    async fn all_employees(&self) -> Result<Vec<Employee>, Error> {
        let employees = self.cached_collection().await?;
        Ok(employees.as_ref().clone())
    }

    async fn search_employees(&self, term: &str) -> Result<Vec<Employee>, Error> {
        let key = normalise_search_term(term)
            .ok_or_else(|| Error::invalid_input("Search cannot be null or empty"))?;

        let search = self.caches.search();
        if let Some(hit) = search.get(&key) {
            debug!(term = %key, "search cache hit");
            return Ok(hit.as_ref().clone());
        }

        let epoch = search.epoch();
        let employees = self.cached_collection().await?;
        let matches: Vec<Employee> = employees
            .iter()
            .filter(|employee| employee.name().to_lowercase().contains(&key))
            .cloned()
            .collect();
        search.store(epoch, key, Arc::new(matches.clone()));
        Ok(matches)
    }

    async fn employee_by_id(&self, id: &str) -> Result<Employee, Error> {
        let id = validate_id(id)?;
        self.fetch_employee(&id).await
    }

    async fn highest_salary(&self) -> Result<u32, Error> {
        let employees = self.cached_collection().await?;
        aggregation::highest_salary(&employees)
    }

    async fn top_ten_highest_earning_names(&self) -> Result<Vec<String>, Error> {
        let employees = self.cached_collection().await?;
        aggregation::top_ten_by_salary(&employees)
    }
}

#[async_trait]
impl<G> EmployeeCommand for EmployeeService<G>
where
    G: EmployeeGateway + ?Sized + 'static,
{
    async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee, Error> {
        let result = self
            .gateway
            .create(&request)
            .await
            .map_err(map_gateway_error)?;
        if let Some(err) = backend_error(&result) {
            return Err(err);
        }
        let (record, _) = result.into_parts();
        record
            .map(Employee::from)
            .ok_or_else(|| Error::backend_failure("employee backend returned no created record"))
    }

    async fn delete_employee(&self, id: &str) -> Result<String, Error> {
        let id = validate_id(id)?;
        let employee = self.fetch_employee(&id).await?;
        let request = DeleteEmployeeRequest::try_new(employee.name()).map_err(|err| {
            Error::backend_failure(format!("employee {id} cannot be deleted: {err}"))
        })?;

        let result = self
            .gateway
            .delete_by_name(&request)
            .await
            .map_err(map_gateway_error)?;
        if let Some(err) = backend_error(&result) {
            return Err(err);
        }
        let (deleted, _) = result.into_parts();
        if deleted != Some(true) {
            return Err(Error::employee_not_found("Unable to delete employee"));
        }

        self.caches.invalidate_all();
        Ok(request.into_name())
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
