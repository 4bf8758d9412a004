use serde::{Deserialize, Serialize};

/// Property type used by built-in fields such as `email` or `first_name`.
pub const TYPE_SYSTEM: &str = "SYSTEM";

pub const SUBTYPE_WORK: &str = "work";

/// One `{name, type, value, subtype}` entry of a contact's property bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtype: String,
}

impl Property {
    /// A built-in (`SYSTEM`) property.
    pub fn system(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TYPE_SYSTEM.to_string(),
            value: value.into(),
            subtype: String::new(),
        }
    }
}

/// A contact's property bag, searched linearly by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyList(pub Vec<Property>);

impl PropertyList {
    /// First property whose name matches `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// `(type, value)` of the first matching property, or `("", "")`.
    pub fn find(&self, name: &str) -> (&str, &str) {
        self.get(name)
            .map_or(("", ""), |p| (p.kind.as_str(), p.value.as_str()))
    }

    pub fn push(&mut self, property: Property) {
        self.0.push(property);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }
}

impl From<Vec<Property>> for PropertyList {
    fn from(properties: Vec<Property>) -> Self {
        Self(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_bag() -> PropertyList {
        vec![Property {
            name: "Email".to_string(),
            value: "a@b.com".to_string(),
            ..Property::default()
        }]
        .into()
    }

    #[test]
    fn find_matches_name_case_insensitively() {
        assert_eq!(email_bag().find("email"), ("", "a@b.com"));
        assert_eq!(email_bag().find("EMAIL").1, "a@b.com");
    }

    #[test]
    fn find_without_match_yields_empty_pair() {
        assert_eq!(email_bag().find("phone"), ("", ""));
        assert_eq!(PropertyList::default().find("email"), ("", ""));
    }

    #[test]
    fn first_match_wins() {
        let bag: PropertyList = vec![
            Property::system("email", "first@b.com"),
            Property::system("EMAIL", "second@b.com"),
        ]
        .into();
        assert_eq!(bag.find("Email"), (TYPE_SYSTEM, "first@b.com"));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_string(&Property::system("first_name", "Jane")).unwrap();
        assert_eq!(json, r#"{"name":"first_name","type":"SYSTEM","value":"Jane"}"#);
    }
}
