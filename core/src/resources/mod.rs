//! Public operations, one module per resource.
//!
//! Each operation picks a route, a payload shape and the classifier shape
//! that applies; all I/O and status handling lives in `crate::classify`.

mod companies;
mod contacts;
mod deals;
mod documents;
mod events;
mod filters;
mod notes;
mod tasks;

/// `page_size` and `cursor` parameters; non-positive sizes and empty
/// cursors are left to the server's defaults.
pub(crate) fn page_params(page_size: i32, cursor: &str) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if page_size > 0 {
        params.push(("page_size", page_size.to_string()));
    }
    if !cursor.is_empty() {
        params.push(("cursor", cursor.to_string()));
    }
    params
}
