use chrono::{DateTime, Utc};

use crate::classify::{LENIENT_LIST, SEND};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::Body;
use crate::types::{Event, EventList, EventUpsert};

impl Client {
    /// Events overlapping `[start, end]`. The API takes unix seconds.
    pub fn list_events(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<EventList> {
        let query = [
            ("start", start.timestamp().to_string()),
            ("end", end.timestamp().to_string()),
        ];
        self.list(HttpMethod::Get, "api/events", Body::Empty, &query, LENIENT_LIST)
    }

    pub fn get_contact_events(&self, contact_id: i64) -> Result<EventList> {
        self.list(
            HttpMethod::Get,
            &format!("api/contacts/{contact_id}/events/sort"),
            Body::Empty,
            &[],
            LENIENT_LIST,
        )
    }

    pub fn create_event(&self, mut draft: EventUpsert) -> Result<Event> {
        draft.id = None;
        self.write_event(HttpMethod::Post, draft)
    }

    pub fn update_event(&self, id: i64, mut draft: EventUpsert) -> Result<Event> {
        draft.id = Some(id);
        self.write_event(HttpMethod::Put, draft)
    }

    pub fn delete_event(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/events/{id}"))
    }

    /// Both writes share one route; the echo comes back in the read shape.
    fn write_event(&self, method: HttpMethod, draft: EventUpsert) -> Result<Event> {
        let saved = self.send::<_, Event>(method, "api/events", SEND, &draft)?;
        Ok(saved.unwrap_or_default())
    }
}
