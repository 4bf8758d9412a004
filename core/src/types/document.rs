use serde::{Deserialize, Serialize};

use super::{is_default, ContactList, ContactUser, DealList};

/// A document linked to contacts, deals or cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dummy_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub uploaded_time: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub size: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub case_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deal_ids: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub update: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ContactUser>,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub contacts: ContactList,
    #[serde(skip_serializing_if = "DealList::is_empty")]
    pub deals: DealList,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub related_contacts: ContactList,
}

/// Write shape for documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "is_default")]
    pub size: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deal_ids: Vec<String>,
}
