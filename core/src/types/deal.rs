use serde::{Deserialize, Serialize};

use super::{is_default, ContactList, Paginated};

/// A sales opportunity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deal {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_default")]
    pub expected_value: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub pipeline_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub milestone: String,
    /// Win probability in percent. The API spells the field `probabilty`.
    #[serde(rename = "probabilty", skip_serializing_if = "is_default")]
    pub probability: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub close_date: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefs: String,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub contacts: ContactList,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

impl Paginated for Deal {
    fn cursor(&self) -> &str {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_keeps_vendor_spelling() {
        let deal = Deal {
            name: "Renewal".to_string(),
            probability: 60,
            expected_value: 1200.5,
            ..Deal::default()
        };
        let json = serde_json::to_value(&deal).unwrap();
        assert_eq!(json["probabilty"], 60);
        assert_eq!(json["expected_value"], 1200.5);
        assert!(json.get("probability").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn embedded_contacts_decode() {
        let deal: Deal =
            serde_json::from_str(r#"{"id":3,"milestone":"Won","contacts":[{"id":8,"type":"PERSON"}]}"#).unwrap();
        assert_eq!(deal.milestone, "Won");
        assert_eq!(deal.contacts.len(), 1);
        assert_eq!(deal.contacts[0].id, 8);
    }
}
