use crate::classify::{LENIENT_LIST, SEND};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::{to_json, Body};
use crate::types::{Note, NoteList};

impl Client {
    /// Creates a note linked to whatever `contact_ids` / `deal_ids` it names.
    pub fn create_note(&self, note: Note) -> Result<Note> {
        let draft = note.into_draft();
        let saved = self.send(HttpMethod::Post, "api/notes", SEND, &draft)?;
        Ok(saved.unwrap_or(draft))
    }

    /// Attaches `note` to the contact with the given email address.
    pub fn add_note_to_contact(&self, email: &str, note: Note) -> Result<Note> {
        let draft = note.into_draft();
        let fields = [("email", email.to_string()), ("note", to_json(&draft)?)];
        let saved = self.send_form("api/contacts/email/note/add", SEND, &fields)?;
        Ok(saved.unwrap_or(draft))
    }

    pub fn get_contact_notes(&self, contact_id: i64) -> Result<NoteList> {
        self.list(
            HttpMethod::Get,
            &format!("api/contacts/{contact_id}/notes"),
            Body::Empty,
            &[],
            LENIENT_LIST,
        )
    }

    pub fn delete_contact_note(&self, contact_id: i64, note_id: i64) -> Result<()> {
        self.delete(&format!("api/contacts/{contact_id}/notes/{note_id}"))
    }

    /// Attaches `note` to deal `deal_id` only; any contact links are dropped.
    pub fn create_deal_note(&self, deal_id: i64, note: Note) -> Result<Note> {
        let mut draft = note.into_draft();
        draft.contact_ids.clear();
        draft.deal_ids.push(deal_id.to_string());
        let saved = self.send(HttpMethod::Put, "api/opportunity/deals/notes", SEND, &draft)?;
        Ok(saved.unwrap_or(draft))
    }

    pub fn get_deal_notes(&self, deal_id: i64) -> Result<NoteList> {
        self.list(
            HttpMethod::Get,
            &format!("api/opportunity/{deal_id}/notes"),
            Body::Empty,
            &[],
            LENIENT_LIST,
        )
    }
}
