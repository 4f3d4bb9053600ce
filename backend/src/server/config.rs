//! HTTP server configuration: OrthoConfig settings and the server config
//! object built from them.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings loaded from CLI arguments, `EMPLOYEE_API_*` environment
/// variables, and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEE_API")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Employee backend collection URL. Absent means the in-memory gateway.
    pub backend_url: Option<String>,
    /// Per-request timeout for backend calls, in seconds.
    #[ortho_config(default = 10)]
    pub backend_timeout_secs: u64,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured backend timeout.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

/// Settings that cannot be turned into a server configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid backend url {value}: {source}")]
    BackendUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend timeout must be at least one second")]
    ZeroTimeout,
}

/// Where employee data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendTarget {
    /// Remote backend reached over HTTP.
    Http { base_url: Url, timeout: Duration },
    /// Process-local fixture data.
    InMemory,
}

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: BackendTarget,
}

impl ServerConfig {
    /// Construct a server configuration directly.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, backend: BackendTarget) -> Self {
        Self { bind_addr, backend }
    }

    /// Validate loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the bind address or backend URL does not
    /// parse, or the timeout is zero.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        let raw_addr = settings.bind_addr();
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: raw_addr.to_owned(),
                source,
            })?;

        let timeout = settings.backend_timeout();
        if timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout);
        }

        let backend = match settings.backend_url.as_deref() {
            Some(raw) => BackendTarget::Http {
                base_url: Url::parse(raw).map_err(|source| SettingsError::BackendUrl {
                    value: raw.to_owned(),
                    source,
                })?,
                timeout,
            },
            None => BackendTarget::InMemory,
        };

        Ok(Self::new(bind_addr, backend))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the configured employee backend.
    #[must_use]
    pub fn backend(&self) -> &BackendTarget {
        &self.backend
    }
}
