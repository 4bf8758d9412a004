use serde::{Deserialize, Serialize};

use super::{is_default, ContactList};

/// Calendar event as returned by the API. Times are unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub all_day: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "is_default")]
    pub start: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub end: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub is_event_starred: bool,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub contacts: ContactList,
}

/// Write shape for events. Contacts are referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub all_day: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "is_default")]
    pub start: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub end: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub is_event_starred: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_id_is_written_even_when_zero() {
        let upsert = EventUpsert {
            id: Some(0),
            title: "Demo".to_string(),
            ..EventUpsert::default()
        };
        assert_eq!(serde_json::to_string(&upsert).unwrap(), r#"{"id":0,"title":"Demo"}"#);
    }

    #[test]
    fn absent_id_is_omitted() {
        let upsert = EventUpsert {
            title: "Demo".to_string(),
            contacts: vec!["17".to_string()],
            ..EventUpsert::default()
        };
        assert_eq!(serde_json::to_string(&upsert).unwrap(), r#"{"title":"Demo","contacts":["17"]}"#);
    }
}
