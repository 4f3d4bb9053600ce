//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **employee_api**: reqwest-backed HTTP gateway to the employee backend
//! - **in_memory**: process-local gateway used when no backend is configured
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod employee_api;
pub mod in_memory;
