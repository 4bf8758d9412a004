//! Request construction.
//!
//! Routes are always relative to the client's base URL and are joined by
//! plain concatenation, so callers must hand in URL-safe routes. Anything
//! that needs escaping (emails in paths) is escaped by the resource method
//! before it gets here.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::client::Client;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest};

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Characters left as-is when a value is embedded in a route segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'@').remove(b'.').remove(b'-').remove(b'_');

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Body {
    Empty,
    Json(String),
    /// Already url-encoded form fields.
    Form(String),
}

/// Serializes `value` for a request body or form field.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ApiError::RequestConstruction(format!("could not serialize body: {e}")))
}

impl Body {
    pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        to_json(value).map(Body::Json)
    }

    pub(crate) fn form(fields: &[(&str, String)]) -> Result<Self> {
        serde_urlencoded::to_string(fields)
            .map(Body::Form)
            .map_err(|e| ApiError::RequestConstruction(format!("could not encode form: {e}")))
    }
}

/// Escapes `value` for use as a single route segment.
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

impl Client {
    /// Builds a request for `route` with the given body and query.
    ///
    /// `POST` and `PUT` default to a JSON content type; form bodies switch
    /// it to url-encoding. Every request accepts JSON.
    pub(crate) fn build_request(
        &self,
        method: HttpMethod,
        route: &str,
        body: Body,
        query: &[(&str, String)],
    ) -> Result<HttpRequest> {
        validate_route(route)?;

        let mut url = format!("{}{route}", self.base_url);
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| ApiError::RequestConstruction(format!("could not encode query: {e}")))?;
            url.push(if route.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }

        let mut headers = Vec::with_capacity(2);
        let body = match body {
            Body::Empty => {
                if method.has_body() {
                    headers.push(("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()));
                }
                None
            }
            Body::Json(_) | Body::Form(_) if !method.has_body() => {
                return Err(ApiError::RequestConstruction(format!("{method} requests cannot carry a body")));
            }
            Body::Json(json) => {
                headers.push(("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()));
                Some(json)
            }
            Body::Form(form) => {
                headers.push(("Content-Type".to_string(), CONTENT_TYPE_FORM.to_string()));
                Some(form)
            }
        };
        headers.push(("Accept".to_string(), CONTENT_TYPE_JSON.to_string()));

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: self.timeout,
        })
    }
}

fn validate_route(route: &str) -> Result<()> {
    if route.starts_with('/') || route.contains("://") {
        return Err(ApiError::RequestConstruction(format!("route `{route}` must be relative")));
    }
    if let Some(c) = route.chars().find(|c| !c.is_ascii_graphic()) {
        return Err(ApiError::RequestConstruction(format!(
            "route `{}` contains unescaped character {c:?}",
            route.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Config;

    fn client() -> Client {
        Client::new(Config::new("acme", "user", "pass")).unwrap()
    }

    #[test]
    fn get_request_has_accept_but_no_content_type() {
        let req = client().build_request(HttpMethod::Get, "api/contacts/7", Body::Empty, &[]).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://acme.vendor.example/dev/api/contacts/7");
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
        assert_eq!(req.timeout, client().timeout());
    }

    #[test]
    fn post_without_body_still_declares_json() {
        let req = client()
            .build_request(HttpMethod::Post, "api/contacts/companies/list", Body::Empty, &[])
            .unwrap();
        assert_eq!(req.header("Content-Type"), Some(CONTENT_TYPE_JSON));
        assert!(req.body.is_none());
    }

    #[test]
    fn json_body_is_attached() {
        let body = Body::json(&serde_json::json!({"id": 3})).unwrap();
        let req = client().build_request(HttpMethod::Put, "api/tasks/partial-update", body, &[]).unwrap();
        assert_eq!(req.header("Content-Type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(req.body.as_deref(), Some(r#"{"id":3}"#));
    }

    #[test]
    fn form_body_switches_content_type() {
        let body = Body::form(&[("email", "a@b.com".to_string()), ("note", "{\"subject\":\"hi\"}".to_string())]).unwrap();
        let req = client()
            .build_request(HttpMethod::Post, "api/contacts/email/note/add", body, &[])
            .unwrap();
        assert_eq!(req.header("content-type"), Some(CONTENT_TYPE_FORM));
        assert_eq!(
            req.body.as_deref(),
            Some("email=a%40b.com&note=%7B%22subject%22%3A%22hi%22%7D")
        );
        assert_eq!(req.header("accept"), Some(CONTENT_TYPE_JSON));
    }

    #[test]
    fn query_is_encoded_and_appended() {
        let req = client()
            .build_request(
                HttpMethod::Get,
                "api/contacts",
                Body::Empty,
                &[("page_size", "25".to_string()), ("cursor", "a b/c".to_string())],
            )
            .unwrap();
        assert_eq!(
            req.url,
            "https://acme.vendor.example/dev/api/contacts?page_size=25&cursor=a+b%2Fc"
        );
    }

    #[test]
    fn absolute_routes_are_rejected() {
        for route in ["/api/contacts", "https://evil.example/api", "api/contacts/a b"] {
            let err = client().build_request(HttpMethod::Get, route, Body::Empty, &[]).unwrap_err();
            assert!(matches!(err, ApiError::RequestConstruction(_)), "{route}");
        }
    }

    #[test]
    fn body_on_get_is_rejected() {
        let err = client()
            .build_request(HttpMethod::Get, "api/tasks", Body::Json("{}".to_string()), &[])
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestConstruction(_)));
    }

    #[test]
    fn path_segment_keeps_email_readable() {
        assert_eq!(path_segment("jane.doe@example.com"), "jane.doe@example.com");
        assert_eq!(path_segment("a+b/c@d.com"), "a%2Bb%2Fc@d.com");
    }
}
