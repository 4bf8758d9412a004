use crate::classify::{SEND, STRICT_LIST};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::Body;
use crate::resources::page_params;
use crate::types::{Deal, DealList};

impl Client {
    /// Lists deals. `ApiError::EmptyResult` when the account has none.
    pub fn list_deals(&self, page_size: i32, cursor: &str) -> Result<DealList> {
        self.list(
            HttpMethod::Get,
            "api/opportunity",
            Body::Empty,
            &page_params(page_size, cursor),
            STRICT_LIST,
        )
    }

    pub fn find_deal_by_id(&self, id: i64) -> Result<Deal> {
        self.find_by_id(&format!("api/opportunity/{id}"))
    }

    pub fn create_deal(&self, draft: Deal) -> Result<Deal> {
        let saved = self.send(HttpMethod::Post, "api/opportunity", SEND, &draft)?;
        Ok(saved.unwrap_or(draft))
    }

    /// Partial update: only the non-empty fields of `draft` are changed.
    pub fn update_deal(&self, id: i64, mut draft: Deal) -> Result<Deal> {
        draft.id = id;
        let saved = self.send(HttpMethod::Put, "api/opportunity/partial-update", SEND, &draft)?;
        Ok(saved.unwrap_or(draft))
    }

    pub fn delete_deal(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/opportunity/{id}"))
    }
}
