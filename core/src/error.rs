//! Error types for the CRM client.
//!
//! # Design
//! The vendor signals most failures through a handful of status codes, so
//! each one the API documents gets a dedicated variant. Statuses the API does
//! not document land in `UnexpectedStatus` with the code and reason phrase.
//! Nothing here is retried; every error is terminal for the call that
//! produced it.

use std::time::Duration;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configuration is incomplete or malformed (e.g. empty domain).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Username or password was empty after trimming whitespace.
    #[error("username or password is invalid")]
    InvalidCredentials,

    /// The server returned 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned 400 for a write or lookup.
    #[error("input in wrong format")]
    MalformedInput,

    /// The server returned 406 while creating a contact or company.
    #[error("limit of contacts exceeded")]
    ContactLimitExceeded,

    /// A strict list endpoint returned 204.
    #[error("no records in account")]
    EmptyResult,

    /// A lookup endpoint returned 204.
    #[error("no record with that ID found")]
    NotFound,

    /// The server returned a status the operation does not expect.
    #[error("unexpected status: {status} {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    /// The route or body could not be turned into a request.
    #[error("could not build request: {0}")]
    RequestConstruction(String),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not the JSON the operation expects.
    #[error("could not decode response with status {status}: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures raised by a `Transport` before any status code is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connection(String),
}
