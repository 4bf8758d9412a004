//! Client construction and configuration.
//!
//! # Design
//! `Client` holds only the resolved base URL, the fixed request timeout and
//! an authenticated transport. It carries no mutable state between calls, so
//! one instance can be cloned and shared across threads freely. Resource
//! operations live in `crate::resources` as further `impl Client` blocks.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::transport::{BasicAuth, Transport, UreqTransport};

/// Per-request timeout fixed for the lifetime of a client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Host suffix appended to the account domain.
pub const API_HOST: &str = "vendor.example";

pub const ENV_DOMAIN: &str = "CRM_DOMAIN";
pub const ENV_USERNAME: &str = "CRM_USERNAME";
pub const ENV_PASSWORD: &str = "CRM_PASSWORD";
pub const ENV_BASE_URL: &str = "CRM_BASE_URL";

/// Everything needed to build a `Client`.
pub struct Config {
    /// Account subdomain, e.g. `acme` for `https://acme.vendor.example/dev/`.
    pub domain: String,
    pub username: String,
    pub password: SecretString,
    /// Transport to wrap with Basic auth. Defaults to `UreqTransport`.
    pub transport: Option<Arc<dyn Transport>>,
    /// Replaces the URL derived from `domain`. Used to target local mocks.
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(domain: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            transport: None,
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Reads `CRM_DOMAIN`, `CRM_USERNAME`, `CRM_PASSWORD` and the optional
    /// `CRM_BASE_URL` from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(
            required_var(ENV_DOMAIN)?,
            required_var(ENV_USERNAME)?,
            required_var(ENV_PASSWORD)?,
        );
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config.base_url = Some(url);
            }
        }
        Ok(config)
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ApiError::Config(format!("environment variable {name} is not set")))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("password", &self.password)
            .field("custom_transport", &self.transport.is_some())
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Synchronous client for the CRM REST API.
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) transport: Arc<dyn Transport>,
}

impl Client {
    /// Validates `config` and wires the authenticated transport.
    ///
    /// Fails with `ApiError::Config` for a missing or malformed domain and
    /// with `ApiError::InvalidCredentials` when the username or password is
    /// blank.
    pub fn new(config: Config) -> Result<Self> {
        let Config {
            domain,
            username,
            password,
            transport,
            base_url,
        } = config;

        let domain = domain.trim();
        if domain.is_empty() {
            return Err(ApiError::Config("domain is required in config".to_string()));
        }
        if !domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ApiError::Config(format!("domain `{domain}` is not a valid subdomain")));
        }

        let username = username.trim();
        let password = password.expose_secret().trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }

        let base_url = match base_url {
            Some(url) => normalize_base_url(&url)?,
            None => format!("https://{domain}.{API_HOST}/dev/"),
        };

        let inner = transport.unwrap_or_else(|| Arc::new(UreqTransport::new()));
        let transport = BasicAuth::new(username, SecretString::from(password.to_string()), inner);

        debug!(domain, base_url = %base_url, "configured CRM client");
        Ok(Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
            transport: Arc::new(transport),
        })
    }

    /// Root every route is resolved against; always ends with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::Config(format!("base URL `{url}` must be absolute http(s)")));
    }
    Ok(format!("{}/", url.trim_end_matches('/')))
}
