use crate::classify::{LENIENT_LIST, SEND};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::Body;
use crate::types::{Document, DocumentList, DocumentUpsert};

impl Client {
    pub fn get_contact_documents(&self, contact_id: i64) -> Result<DocumentList> {
        self.list(
            HttpMethod::Get,
            &format!("api/documents/contact/{contact_id}/docs"),
            Body::Empty,
            &[],
            LENIENT_LIST,
        )
    }

    /// Registers a document. The echo is the stored record, including the
    /// upload time and owning user; an empty echo yields `Document::default()`.
    pub fn create_document(&self, mut draft: DocumentUpsert) -> Result<Document> {
        draft.id = None;
        let saved = self.send::<_, Document>(HttpMethod::Post, "api/documents", SEND, &draft)?;
        Ok(saved.unwrap_or_default())
    }

    pub fn update_document(&self, id: i64, mut draft: DocumentUpsert) -> Result<Document> {
        draft.id = Some(id);
        let saved = self.send::<_, Document>(HttpMethod::Put, "api/documents", SEND, &draft)?;
        Ok(saved.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ApiError;
    use crate::testing::client_with;

    use super::*;

    #[test]
    fn contact_documents() {
        let (client, transport) = client_with(200, r#"[{"id":2,"name":"Contract","contacts":[{"id":5}]}]"#);
        let docs = client.get_contact_documents(5).unwrap();
        assert_eq!(docs[0].name, "Contract");
        assert_eq!(docs[0].contacts[0].id, 5);
        assert!(transport.last_request().url.ends_with("api/documents/contact/5/docs"));
    }

    #[test]
    fn create_and_update_document() {
        let (client, transport) = client_with(200, r#"{"id":9,"name":"Quote"}"#);
        let draft = DocumentUpsert {
            name: "Quote".to_string(),
            url: "https://files.example/quote.pdf".to_string(),
            network_type: "GOOGLE".to_string(),
            ..DocumentUpsert::default()
        };
        assert_eq!(client.create_document(draft.clone()).unwrap().id, 9);
        let req = transport.last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(!req.body.as_deref().unwrap().contains("\"id\""));

        transport.push(401, "");
        assert!(matches!(client.update_document(9, draft), Err(ApiError::Unauthorized)));
        let req = transport.last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.body.as_deref().unwrap().starts_with(r#"{"id":9,"#));
    }

    #[test]
    fn document_echo_keeps_owner_and_upload_time() {
        let echo = r#"{
            "id": 9,
            "name": "Quote",
            "uploaded_time": 1699990000,
            "extension": "pdf",
            "network_type": "GOOGLE",
            "url": "https://files.example/quote.pdf",
            "contact_ids": ["5"],
            "owner": {"id": 2, "domain": "acme", "email": "owner@acme.example", "name": "Owner"},
            "contacts": [{"id": 5, "type": "PERSON"}],
            "deals": [{"id": 3, "name": "Renewal"}]
        }"#;
        let (client, _) = client_with(200, echo);
        let saved = client
            .create_document(DocumentUpsert {
                name: "Quote".to_string(),
                contact_ids: vec!["5".to_string()],
                ..DocumentUpsert::default()
            })
            .unwrap();

        assert_eq!(saved.uploaded_time, 1_699_990_000);
        assert_eq!(saved.owner.as_ref().map(|o| o.email.as_str()), Some("owner@acme.example"));
        assert_eq!(saved.contacts[0].id, 5);
        assert_eq!(saved.deals[0].name, "Renewal");
        assert_eq!(saved.contact_ids, ["5"]);
    }
}
