//! Sends built requests and decodes their bodies.
//!
//! The dispatcher never interprets status codes. It hands the status back
//! next to the decode outcome so the classifier can decide whether a body
//! that failed to decode matters (it does not on a 401 HTML page).

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::Client;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, NO_CONTENT};

/// Outcome of one round trip that produced a status line.
#[derive(Debug)]
pub(crate) struct Dispatched<T> {
    pub(crate) status: u16,
    pub(crate) reason: String,
    /// `Ok(None)` for empty or 204 bodies.
    pub(crate) body: Result<Option<T>>,
}

impl Client {
    /// Sends `request` and decodes a non-empty body into `T`.
    ///
    /// Only transport failures are returned as `Err`; decode failures travel
    /// inside `Dispatched::body` alongside the status.
    pub(crate) fn dispatch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<Dispatched<T>> {
        let method = request.method;
        let route = self.route_of(&request.url).to_string();

        let response = self.transport.send(request).map_err(|e| {
            debug!(%method, route = %route, error = %e, "transport failure");
            ApiError::from(e)
        })?;
        debug!(%method, route = %route, status = response.status, bytes = response.body.len(), "response received");

        let body = if response.body.is_empty() || response.status == NO_CONTENT {
            Ok(None)
        } else {
            serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|source| ApiError::Decode {
                    status: response.status,
                    source,
                })
        };

        Ok(Dispatched {
            status: response.status,
            reason: response.reason,
            body,
        })
    }

    /// Route portion of `url` without base URL or query, for logging.
    fn route_of<'a>(&self, url: &'a str) -> &'a str {
        let route = url.strip_prefix(self.base_url.as_str()).unwrap_or(url);
        route.split('?').next().unwrap_or(route)
    }
}
