//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, BackendTarget, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use employee_api::Trace;
#[cfg(debug_assertions)]
use employee_api::doc::ApiDoc;
use employee_api::domain::ports::EmployeeGateway;
use employee_api::domain::{EmployeeCaches, EmployeeService};
use employee_api::inbound::http::employees;
use employee_api::inbound::http::error::json_error_handler;
use employee_api::inbound::http::health::{HealthState, live, ready};
use employee_api::inbound::http::state::HttpState;
use employee_api::outbound::employee_api::EmployeeHttpGateway;
use employee_api::outbound::in_memory::InMemoryEmployeeGateway;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the employee gateway selected by configuration.
///
/// # Errors
/// Returns [`std::io::Error`] if the HTTP client cannot be constructed.
fn build_gateway(backend: &BackendTarget) -> std::io::Result<Arc<dyn EmployeeGateway>> {
    match backend {
        BackendTarget::Http { base_url, timeout } => {
            let gateway = EmployeeHttpGateway::new(base_url.clone(), *timeout).map_err(|e| {
                std::io::Error::other(format!("employee backend client setup failed: {e}"))
            })?;
            info!(
                backend = %base_url,
                timeout_secs = timeout.as_secs(),
                "using HTTP employee backend"
            );
            Ok(Arc::new(gateway))
        }
        BackendTarget::InMemory => {
            warn!("no backend url configured; serving in-memory employee data");
            Ok(Arc::new(InMemoryEmployeeGateway::seeded()))
        }
    }
}

/// Wire the employee service over the gateway and expose it through both ports.
fn build_http_state(gateway: Arc<dyn EmployeeGateway>) -> web::Data<HttpState> {
    let service = Arc::new(EmployeeService::new(gateway, Arc::new(EmployeeCaches::new())));
    web::Data::new(HttpState::new(service.clone(), service))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .configure(employees::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] naming the bind address and employee backend.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the backend client, binding the
/// socket, or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(build_gateway(config.backend())?);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "employee api listening");
    health_state.mark_ready();
    Ok(server)
}
