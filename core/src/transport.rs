//! Pluggable transports and the Basic-auth wrapper.
//!
//! `Transport` is the only place network I/O happens. The client always
//! talks to its transport through `BasicAuth`, so custom transports never
//! see unauthenticated requests and never need to know the credentials.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// Implementations must read the whole response body before returning and
/// must report non-2xx statuses as responses, not errors; status
/// interpretation belongs to the client.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by a pooled `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let result = match (method, body.as_deref()) {
            (HttpMethod::Get, _) => prepare(self.agent.get(&url), &headers, timeout).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(&url), &headers, timeout).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(&url), &headers, timeout).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(&url), &headers, timeout).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(&url), &headers, timeout).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(&url), &headers, timeout).send_empty(),
        };

        let mut response = result.map_err(|e| transport_error(e, timeout))?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| transport_error(e, timeout))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn prepare<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
    timeout: Duration,
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.config().timeout_global(Some(timeout)).build()
}

fn transport_error(err: ureq::Error, timeout: Duration) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(timeout),
        other => TransportError::Connection(other.to_string()),
    }
}

/// Injects HTTP Basic credentials into every request before delegating.
pub struct BasicAuth {
    username: String,
    password: SecretString,
    inner: Arc<dyn Transport>,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: SecretString, inner: Arc<dyn Transport>) -> Self {
        Self {
            username: username.into(),
            password,
            inner,
        }
    }

    fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password)
            .finish_non_exhaustive()
    }
}

impl Transport for BasicAuth {
    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        request.set_header("Authorization", self.header_value());
        self.inner.send(request)
    }
}
