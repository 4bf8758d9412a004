use std::collections::HashMap;

use crate::classify::{CREATE_CONTACT, LOOKUP, SEARCH, SEND, STRICT_LIST};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::{path_segment, to_json, Body};
use crate::resources::page_params;
use crate::types::{Contact, ContactList, ContactType};

impl Client {
    /// Lists people and companies, newest first.
    ///
    /// Pass the previous page's `cursor()` to continue. Returns
    /// `ApiError::EmptyResult` when the account has no contacts.
    pub fn list_contacts(&self, page_size: i32, cursor: &str) -> Result<ContactList> {
        self.list(
            HttpMethod::Get,
            "api/contacts",
            Body::Empty,
            &page_params(page_size, cursor),
            STRICT_LIST,
        )
    }

    pub fn find_contact_by_id(&self, id: i64) -> Result<Contact> {
        self.find_by_id(&format!("api/contacts/{id}"))
    }

    pub fn find_contact_by_email(&self, email: &str) -> Result<Contact> {
        self.find_with(&format!("api/contacts/search/email/{}", path_segment(email)), LOOKUP)
    }

    /// Looks up several emails in one call. Emails without a contact are
    /// absent from the returned map.
    pub fn find_contacts_by_email(&self, emails: &[&str]) -> Result<HashMap<String, Contact>> {
        let found: Option<Vec<Option<Contact>>> =
            self.send_form("api/contacts/search/email", SEARCH, &[("email_ids", to_json(emails)?)])?;

        Ok(emails
            .iter()
            .zip(found.unwrap_or_default())
            .filter_map(|(email, contact)| contact.map(|c| (email.to_string(), c)))
            .collect())
    }

    /// Creates a person. The returned record carries the server-assigned id.
    pub fn create_contact(&self, draft: Contact) -> Result<Contact> {
        self.create_contact_of(ContactType::Person, draft)
    }

    /// Updates the properties of contact `id`. Lead score, star value and
    /// tags have their own operations.
    pub fn update_contact_properties(&self, id: i64, mut draft: Contact) -> Result<Contact> {
        draft.id = id;
        self.update_contact(draft, "api/contacts/edit-properties")
    }

    pub fn update_contact_lead_score(&self, id: i64, score: i32) -> Result<Contact> {
        let draft = Contact {
            id,
            lead_score: score,
            ..Contact::default()
        };
        self.update_contact(draft, "api/contacts/edit/lead-score")
    }

    pub fn update_contact_star_value(&self, id: i64, stars: i32) -> Result<Contact> {
        let draft = Contact {
            id,
            star_value: stars,
            ..Contact::default()
        };
        self.update_contact(draft, "api/contacts/edit/add-star")
    }

    /// Adds `tags` to contact `id`.
    pub fn update_contact_tags(&self, id: i64, tags: &[&str]) -> Result<Contact> {
        self.update_contact(tagged(id, tags), "api/contacts/edit/tags")
    }

    /// Removes `tags` from contact `id`.
    pub fn delete_contact_tags(&self, id: i64, tags: &[&str]) -> Result<Contact> {
        self.update_contact(tagged(id, tags), "api/contacts/delete/tags")
    }

    pub fn delete_contact(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/contacts/{id}"))
    }

    /// Full-text search over people. A search without hits is an empty list.
    pub fn search_contacts(&self, query: &str, page_size: i32) -> Result<ContactList> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page_params(page_size, ""));
        params.push(("type", "PERSON".to_string()));
        self.list(HttpMethod::Get, "api/search", Body::Empty, &params, SEARCH)
    }

    pub(crate) fn create_contact_of(&self, kind: ContactType, mut draft: Contact) -> Result<Contact> {
        draft.kind = Some(kind);
        let saved = self.send(HttpMethod::Post, "api/contacts", CREATE_CONTACT, &draft)?;
        Ok(saved.unwrap_or(draft))
    }

    fn update_contact(&self, draft: Contact, route: &str) -> Result<Contact> {
        let saved = self.send(HttpMethod::Put, route, SEND, &draft)?;
        Ok(saved.unwrap_or(draft))
    }
}

fn tagged(id: i64, tags: &[&str]) -> Contact {
    Contact {
        id,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Contact::default()
    }
}
