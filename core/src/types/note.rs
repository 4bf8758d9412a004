use serde::{Deserialize, Serialize};

use super::{is_default, ContactList};

/// A note attached to contacts or deals.
///
/// `subject` and `description` are always written, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deal_ids: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    /// Only filled in when listing a contact's notes; cleared before writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub contacts: ContactList,
}

impl Note {
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Copy of the note with read-only fields stripped for a write.
    pub(crate) fn into_draft(mut self) -> Self {
        self.count = None;
        self
    }
}
