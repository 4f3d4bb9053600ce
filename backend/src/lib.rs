//! Employee API library modules.
//!
//! A cached façade over a rate-limited employee backend: `domain` holds the
//! model, the read-through caches, and the service; `inbound` and `outbound`
//! hold the actix and reqwest adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
