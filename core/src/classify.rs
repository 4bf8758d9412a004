//! Status classification shared by every resource operation.
//!
//! # Design
//! Each request shape is a small table of success codes plus a mapping from
//! documented failure codes to domain errors. A status in neither table is an
//! `UnexpectedStatus`; decode failures only surface when the status says the
//! body should have been usable.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::client::Client;
use crate::dispatch::Dispatched;
use crate::error::{ApiError, Result};
use crate::http::HttpMethod;
use crate::request::Body;
use crate::types::Listing;

/// Domain error a documented status code maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    NotFound,
    EmptyResult,
    Unauthorized,
    MalformedInput,
    ContactLimitExceeded,
}

impl Fault {
    fn into_error(self) -> ApiError {
        match self {
            Fault::NotFound => ApiError::NotFound,
            Fault::EmptyResult => ApiError::EmptyResult,
            Fault::Unauthorized => ApiError::Unauthorized,
            Fault::MalformedInput => ApiError::MalformedInput,
            Fault::ContactLimitExceeded => ApiError::ContactLimitExceeded,
        }
    }
}

/// Status interpretation for one request shape.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape {
    pub(crate) success: &'static [u16],
    pub(crate) faults: &'static [(u16, Fault)],
}

pub(crate) const FIND: Shape = Shape {
    success: &[200],
    faults: &[(204, Fault::NotFound), (401, Fault::Unauthorized)],
};

/// Lookups keyed by caller input (email) also reject malformed keys.
pub(crate) const LOOKUP: Shape = Shape {
    success: &[200],
    faults: &[
        (204, Fault::NotFound),
        (401, Fault::Unauthorized),
        (400, Fault::MalformedInput),
    ],
};

pub(crate) const SEND: Shape = Shape {
    success: &[200],
    faults: &[(401, Fault::Unauthorized), (400, Fault::MalformedInput)],
};

pub(crate) const CREATE_CONTACT: Shape = Shape {
    success: &[200],
    faults: &[
        (401, Fault::Unauthorized),
        (400, Fault::MalformedInput),
        (406, Fault::ContactLimitExceeded),
    ],
};

pub(crate) const DELETE: Shape = Shape {
    success: &[204],
    faults: &[],
};

/// Lists where "no content" means the account holds nothing of that kind.
pub(crate) const STRICT_LIST: Shape = Shape {
    success: &[200],
    faults: &[(204, Fault::EmptyResult), (401, Fault::Unauthorized)],
};

/// Lists where "no content" is just an empty page.
pub(crate) const LENIENT_LIST: Shape = Shape {
    success: &[200, 204],
    faults: &[(401, Fault::Unauthorized)],
};

/// Searches whose criteria the server may reject.
pub(crate) const SEARCH: Shape = Shape {
    success: &[200, 204],
    faults: &[(401, Fault::Unauthorized), (400, Fault::MalformedInput)],
};

impl Shape {
    pub(crate) fn classify<T>(&self, dispatched: Dispatched<T>) -> Result<Option<T>> {
        if self.success.contains(&dispatched.status) {
            return dispatched.body;
        }
        if let Some((_, fault)) = self.faults.iter().find(|(code, _)| *code == dispatched.status) {
            return Err(fault.into_error());
        }
        Err(ApiError::UnexpectedStatus {
            status: dispatched.status,
            reason: dispatched.reason,
        })
    }
}

impl Client {
    /// GETs a single record; 204 means it does not exist.
    pub(crate) fn find_by_id<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        self.find_with(route, FIND)
    }

    /// GETs a single record under `shape`. A success without a body is
    /// treated as "no such record".
    pub(crate) fn find_with<T: DeserializeOwned>(&self, route: &str, shape: Shape) -> Result<T> {
        let request = self.build_request(HttpMethod::Get, route, Body::Empty, &[])?;
        shape.classify(self.dispatch(request)?)?.ok_or(ApiError::NotFound)
    }

    /// Writes `input` as JSON and decodes the server's canonical record.
    ///
    /// `Ok(None)` means the server accepted the write without echoing it.
    pub(crate) fn send<I, O>(&self, method: HttpMethod, route: &str, shape: Shape, input: &I) -> Result<Option<O>>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let request = self.build_request(method, route, Body::json(input)?, &[])?;
        shape.classify(self.dispatch(request)?)
    }

    /// POSTs url-encoded `fields` and decodes the response.
    pub(crate) fn send_form<O: DeserializeOwned>(
        &self,
        route: &str,
        shape: Shape,
        fields: &[(&str, String)],
    ) -> Result<Option<O>> {
        let request = self.build_request(HttpMethod::Post, route, Body::form(fields)?, &[])?;
        shape.classify(self.dispatch(request)?)
    }

    /// DELETEs `route`; only 204 counts as success.
    pub(crate) fn delete(&self, route: &str) -> Result<()> {
        let request = self.build_request(HttpMethod::Delete, route, Body::Empty, &[])?;
        DELETE.classify(self.dispatch::<IgnoredAny>(request)?).map(|_| ())
    }

    /// Fetches a list; a success without a body yields an empty list.
    pub(crate) fn list<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        route: &str,
        body: Body,
        query: &[(&str, String)],
        shape: Shape,
    ) -> Result<Listing<T>> {
        let request = self.build_request(method, route, body, query)?;
        Ok(shape.classify(self.dispatch(request)?)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::testing::client_with;

    fn dispatched(status: u16, body: Result<Option<Value>>) -> Dispatched<Value> {
        Dispatched {
            status,
            reason: String::new(),
            body,
        }
    }

    #[test]
    fn status_table() {
        let cases: &[(Shape, u16, &str)] = &[
            (FIND, 200, "ok"),
            (FIND, 204, "NotFound"),
            (FIND, 401, "Unauthorized"),
            (SEND, 200, "ok"),
            (SEND, 400, "MalformedInput"),
            (SEND, 401, "Unauthorized"),
            (SEND, 406, "UnexpectedStatus"),
            (CREATE_CONTACT, 406, "ContactLimitExceeded"),
            (STRICT_LIST, 204, "EmptyResult"),
            (LENIENT_LIST, 204, "ok"),
            (DELETE, 204, "ok"),
            (DELETE, 200, "UnexpectedStatus"),
            (LOOKUP, 400, "MalformedInput"),
            (SEARCH, 500, "UnexpectedStatus"),
        ];

        for (shape, status, expected) in cases {
            let result = shape.classify(dispatched(*status, Ok(None)));
            let actual = match result {
                Ok(_) => "ok",
                Err(ApiError::NotFound) => "NotFound",
                Err(ApiError::Unauthorized) => "Unauthorized",
                Err(ApiError::MalformedInput) => "MalformedInput",
                Err(ApiError::ContactLimitExceeded) => "ContactLimitExceeded",
                Err(ApiError::EmptyResult) => "EmptyResult",
                Err(ApiError::UnexpectedStatus { .. }) => "UnexpectedStatus",
                Err(other) => panic!("unexpected error {other:?}"),
            };
            assert_eq!(actual, *expected, "shape {shape:?} status {status}");
        }
    }

    #[test]
    fn documented_status_wins_over_decode_error() {
        let decode_err = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = FIND
            .classify(dispatched(401, Err(ApiError::Decode { status: 401, source: decode_err })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn decode_error_on_success_propagates() {
        let decode_err = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = SEND
            .classify(dispatched(200, Err(ApiError::Decode { status: 200, source: decode_err })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: 200, .. }));
    }

    #[test]
    fn find_without_body_is_not_found() {
        let (client, _) = client_with(200, "");
        let err = client.find_by_id::<Value>("api/tasks/9").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn delete_failure_carries_status_text() {
        let (client, transport) = client_with(404, "<html>gone</html>");
        let err = client.delete("api/contacts/7").unwrap_err();
        assert!(err.to_string().contains("Not Found"), "{err}");
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 404, .. }));
        assert_eq!(transport.last_request().method, HttpMethod::Delete);
    }

    #[test]
    fn delete_succeeds_only_on_no_content() {
        let (client, _) = client_with(204, "");
        client.delete("api/contacts/7").unwrap();
    }

    #[test]
    fn list_without_content_is_empty_when_lenient() {
        let (client, _) = client_with(204, "");
        let list: Listing<Value> = client
            .list(HttpMethod::Get, "api/tasks", Body::Empty, &[], LENIENT_LIST)
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn send_reports_server_echo() {
        let (client, transport) = client_with(200, r#"{"id":5}"#);
        let echoed: Option<Value> = client
            .send(HttpMethod::Post, "api/notes", SEND, &serde_json::json!({"subject": "s"}))
            .unwrap();
        assert_eq!(echoed.unwrap()["id"], 5);
        assert_eq!(transport.last_request().body.as_deref(), Some(r#"{"subject":"s"}"#));
    }
}
