use serde::de::DeserializeOwned;

use crate::classify::SEARCH;
use crate::client::Client;
use crate::error::Result;
use crate::request::to_json;
use crate::types::{ContactList, DealList, Filter, FilterTarget, Listing};

const FILTER_PAGE_SIZE: i32 = 10;
const FILTER_SORT_KEY: &str = "-created_time";

impl Client {
    /// Runs `filter` against the dynamic filter endpoint and returns the
    /// first page of matches, newest first.
    pub fn dynamic_filter<T: DeserializeOwned>(&self, filter: &Filter) -> Result<Listing<T>> {
        let fields = [
            ("page_size", FILTER_PAGE_SIZE.to_string()),
            ("global_sort_key", FILTER_SORT_KEY.to_string()),
            ("filterJson", to_json(filter)?),
        ];
        let found = self.send_form("api/filters/filter/dynamic-filter", SEARCH, &fields)?;
        Ok(found.unwrap_or_default())
    }

    pub fn find_contacts_by_tag(&self, tag: &str) -> Result<ContactList> {
        self.dynamic_filter(&Filter::tagged(FilterTarget::Person, tag))
    }

    pub fn find_companies_by_tag(&self, tag: &str) -> Result<ContactList> {
        self.dynamic_filter(&Filter::tagged(FilterTarget::Company, tag))
    }

    pub fn find_deals_by_tag(&self, tag: &str) -> Result<DealList> {
        self.dynamic_filter(&Filter::tagged(FilterTarget::Opportunity, tag))
    }
}
