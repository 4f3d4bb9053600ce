//! Employee backend outbound adapters.
//!
//! This module provides the HTTP implementation of the `EmployeeGateway`
//! port.

mod dto;
mod http_gateway;

pub use http_gateway::EmployeeHttpGateway;
