//! HTTP request and response types shared by the client and its transports.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and interprets `HttpResponse` values; a `Transport` performs the
//! actual I/O in between. Keeping the I/O behind that seam lets tests swap in
//! scripted transports and lets callers bring their own HTTP stack.

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods that carry a request body.
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully addressed HTTP request.
///
/// `url` already includes the encoded query string. `timeout` bounds the
/// whole round trip and is set by the client, not by individual operations.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Returns the first header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name` to `value`, replacing any existing values for it.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }
}

/// An HTTP response with its body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status`, e.g. `Not Found`. May be empty.
    ///
    /// `UreqTransport` fills this with the canonical phrase for the status
    /// code, not the text the server sent on its status line, so a custom
    /// phrase like `404 Gone Fishing` surfaces as `Not Found`. Unregistered
    /// codes get an empty reason.
    pub reason: String,
    pub body: String,
}

pub const NO_CONTENT: u16 = 204;

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "https://acme.vendor.example/dev/api/contacts".to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(request().header("accept"), Some("application/json"));
        assert_eq!(request().header("content-type"), None);
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut req = request();
        req.set_header("authorization", "Basic one");
        req.set_header("Authorization", "Basic two");
        let auth: Vec<_> = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(req.header("Authorization"), Some("Basic two"));
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
