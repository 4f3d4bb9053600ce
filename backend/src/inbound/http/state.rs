//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeeCommand, EmployeeQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeQuery>,
    pub employee_commands: Arc<dyn EmployeeCommand>,
}

impl HttpState {
    /// Construct state from the read and write ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use employee_api::domain::{EmployeeCaches, EmployeeService};
    /// use employee_api::inbound::http::state::HttpState;
    /// use employee_api::outbound::in_memory::InMemoryEmployeeGateway;
    ///
    /// let service = Arc::new(EmployeeService::new(
    ///     Arc::new(InMemoryEmployeeGateway::seeded()),
    ///     Arc::new(EmployeeCaches::new()),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _employees = state.employees.clone();
    /// ```
    pub fn new(
        employees: Arc<dyn EmployeeQuery>,
        employee_commands: Arc<dyn EmployeeCommand>,
    ) -> Self {
        Self {
            employees,
            employee_commands,
        }
    }
}
