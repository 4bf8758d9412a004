use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{is_default, Paginated, Property, PropertyList};

/// Discriminates people from companies; both live behind the contacts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Person,
    Company,
}

/// A person or company record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContactType>,
    #[serde(skip_serializing_if = "is_default")]
    pub star_value: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub lead_score: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_company_id: String,
    #[serde(rename = "formId", skip_serializing_if = "is_default")]
    pub form_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub last_contacted: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub last_emailed: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub last_campaign_emailed: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub last_called: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub updated_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewed: Option<Viewed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags_with_time: Vec<TagWithTime>,
    #[serde(skip_serializing_if = "PropertyList::is_empty")]
    pub properties: PropertyList,
    #[serde(rename = "campaignStatus", skip_serializing_if = "Vec::is_empty")]
    pub campaign_status: Vec<Value>,
    #[serde(rename = "unsubscribeStatus", skip_serializing_if = "Vec::is_empty")]
    pub unsubscribe_status: Vec<Value>,
    #[serde(rename = "emailBounceStatus", skip_serializing_if = "Vec::is_empty")]
    pub email_bounce_status: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ContactUser>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

impl Contact {
    /// Email address from the property bag, or `""` if there is none.
    pub fn email(&self) -> &str {
        self.properties.find("email").1
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

impl Paginated for Contact {
    fn cursor(&self) -> &str {
        &self.cursor
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewed {
    #[serde(skip_serializing_if = "is_default")]
    pub viewed_time: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub viewer_id: i64,
}

/// A tag together with the moment it was attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagWithTime {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Sent by the API either as an RFC 3339 string or as epoch
    /// milliseconds. Always written back as RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "tag_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub available_count: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
}

/// Account user that owns a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactUser {
    pub id: i64,
    pub domain: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "pic")]
    pub picture_url: String,
    pub schedule_id: String,
    pub calendar_url: String,
    #[serde(rename = "calendarURL")]
    pub calendar_page_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTime {
    Millis(i64),
    Stamp(DateTime<Utc>),
}

fn tag_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<WireTime>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WireTime::Stamp(at)) => Ok(Some(at)),
        Some(WireTime::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("tag timestamp {ms} out of range"))),
    }
}
