//! Wire records for the CRM resources.
//!
//! # Design
//! Read shapes mirror what the API returns and are written back with
//! "omit when empty" semantics: default scalars, empty strings, empty lists
//! and absent nested records never reach the wire. Writes whose identity
//! must distinguish "no id yet" from "this id" use separate `*Upsert`
//! shapes with `Option<i64>` ids.
//!
//! Lists are plain JSON arrays. The API has no "next page" field; the
//! continuation token is the `cursor` of the last element.

mod contact;
mod deal;
mod document;
mod event;
mod filter;
mod note;
mod property;
mod task;

use std::ops::Deref;

use serde::{Deserialize, Serialize};

pub use contact::{Contact, ContactType, ContactUser, TagWithTime, Viewed};
pub use deal::Deal;
pub use document::{Document, DocumentUpsert};
pub use event::{Event, EventUpsert};
pub use filter::{Filter, FilterCondition, FilterRule, FilterTarget};
pub use note::Note;
pub use property::{Property, PropertyList, SUBTYPE_WORK, TYPE_SYSTEM};
pub use task::{Task, TaskOwner, TaskPriority, TaskStatus, TaskType, TaskUpsert};

pub type ContactList = Listing<Contact>;
pub type DealList = Listing<Deal>;
pub type TaskList = Listing<Task>;
pub type NoteList = Listing<Note>;
pub type EventList = Listing<Event>;
pub type DocumentList = Listing<Document>;

/// Records that carry a pagination cursor.
pub trait Paginated {
    fn cursor(&self) -> &str;
}

/// Ordered page of records as returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing<T>(Vec<T>);

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: Paginated> Listing<T> {
    /// Continuation token for the next page: the last record's cursor, or
    /// `""` when the page is empty.
    pub fn cursor(&self) -> &str {
        self.0.last().map_or("", Paginated::cursor)
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Listing<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for Listing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64, cursor: &str) -> Contact {
        Contact {
            id,
            cursor: cursor.to_string(),
            ..Contact::default()
        }
    }

    #[test]
    fn cursor_comes_from_last_element() {
        let list: ContactList = vec![contact(1, ""), contact(2, "xyz")].into();
        assert_eq!(list.cursor(), "xyz");
    }

    #[test]
    fn cursor_ignores_earlier_elements() {
        let list: ContactList = vec![contact(1, "abc"), contact(2, "")].into();
        assert_eq!(list.cursor(), "");
    }

    #[test]
    fn empty_list_has_empty_cursor() {
        assert_eq!(ContactList::new().cursor(), "");
        assert_eq!(DealList::default().cursor(), "");
    }

    #[test]
    fn listing_is_a_plain_json_array() {
        let list: DealList = serde_json::from_str(r#"[{"id":1},{"id":2,"cursor":"n2"}]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, 2);
        assert_eq!(list.cursor(), "n2");
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"[{"id":1},{"id":2,"cursor":"n2"}]"#);
    }
}
