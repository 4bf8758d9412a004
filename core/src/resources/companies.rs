use crate::classify::LENIENT_LIST;
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::Body;
use crate::resources::page_params;
use crate::types::{Contact, ContactList, ContactType};

// Companies are contacts of type COMPANY; only the list has its own route.
impl Client {
    /// Lists companies. Pagination goes in the form body, not the query.
    pub fn list_companies(&self, page_size: i32, cursor: &str) -> Result<ContactList> {
        let params = page_params(page_size, cursor);
        let body = if params.is_empty() {
            Body::Empty
        } else {
            Body::form(&params)?
        };
        self.list(HttpMethod::Post, "api/contacts/companies/list", body, &[], LENIENT_LIST)
    }

    pub fn create_company(&self, draft: Contact) -> Result<Contact> {
        self.create_contact_of(ContactType::Company, draft)
    }

    pub fn update_company_properties(&self, id: i64, draft: Contact) -> Result<Contact> {
        self.update_contact_properties(id, draft)
    }

    pub fn find_company_by_id(&self, id: i64) -> Result<Contact> {
        self.find_contact_by_id(id)
    }

    pub fn delete_company(&self, id: i64) -> Result<()> {
        self.delete_contact(id)
    }
}
