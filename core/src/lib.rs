//! Synchronous client for a hosted CRM's REST API.
//!
//! # Overview
//! Covers contacts, companies, deals, tasks, notes, events, documents and
//! tag filters. Every operation is one blocking round trip through a
//! [`Transport`]; the default one is a shared `ureq` agent wrapped in
//! HTTP Basic authentication.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so everything above the transport is deterministic and testable with a
//!   scripted transport.
//! - Status handling is table driven: each operation names the shape of its
//!   request and the classifier maps documented statuses to [`ApiError`]
//!   variants. Nothing is retried.
//! - Wire records omit empty fields on write. Shapes whose id must be able
//!   to be absent come in separate `*Upsert` variants.
//! - The library logs through `tracing` and never installs a subscriber.
//!
//! ```no_run
//! use crm_core::{Client, Config};
//!
//! # fn main() -> crm_core::Result<()> {
//! let client = Client::new(Config::from_env()?)?;
//! let page = client.list_contacts(25, "")?;
//! for contact in page.iter() {
//!     println!("{} {}", contact.id, contact.email());
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
pub mod client;
mod dispatch;
pub mod error;
pub mod http;
mod request;
mod resources;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{Client, Config};
pub use error::{ApiError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{BasicAuth, Transport, UreqTransport};
pub use types::*;
