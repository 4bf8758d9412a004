//! In-memory stand-in for the CRM REST API.
//!
//! # Design
//! Serves the `/dev/api/...` routes the client uses for contacts, companies,
//! deals, tasks, notes and tag filters. Records are stored as raw JSON so the
//! mock never drifts from what the client sends; ids are assigned from a
//! single counter. Status behavior follows the vendor contract:
//! - every request needs the configured Basic credentials (401 otherwise)
//! - finds answer 204 for unknown ids, deletes answer 204 on success
//! - list endpoints answer 204 when there is nothing to return
//! - contact creation past the account limit answers 406
//! - writes that reference unknown records or carry bad JSON answer 400
//!
//! Pagination: records come out in id order and the last record of a page
//! carries a `cursor` when more remain. Filters return newest first.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_USERNAME: &str = "admin@acme.example";
pub const DEFAULT_PASSWORD: &str = "secret";
pub const DEFAULT_CONTACT_LIMIT: usize = 50;
const DEFAULT_PAGE_SIZE: usize = 20;

/// Account the mock impersonates.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub password: String,
    pub contact_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            contact_limit: DEFAULT_CONTACT_LIMIT,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    contact_limit: usize,
    contacts: BTreeMap<i64, Value>,
    deals: BTreeMap<i64, Value>,
    tasks: BTreeMap<i64, Value>,
    notes: BTreeMap<i64, Value>,
}

impl Store {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn contact_by_email(&self, email: &str) -> Option<&Value> {
        self.contacts.values().find(|c| email_of(c).is_some_and(|e| e.eq_ignore_ascii_case(email)))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Settings::default())
}

pub fn app_with(settings: Settings) -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        contact_limit: settings.contact_limit,
        ..Store::default()
    }));
    let expected = Arc::new(format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", settings.username, settings.password))
    ));

    let api = Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/{id}", get(get_contact).delete(delete_contact))
        .route("/contacts/{id}/notes", get(contact_notes))
        .route("/contacts/{id}/notes/{note_id}", delete(unlink_contact_note))
        .route("/contacts/{id}/tasks", get(contact_tasks))
        .route("/contacts/search/email", post(find_by_emails))
        .route("/contacts/search/email/{email}", get(find_by_email))
        .route("/contacts/edit-properties", put(edit_properties))
        .route("/contacts/edit/lead-score", put(edit_lead_score))
        .route("/contacts/edit/add-star", put(edit_star_value))
        .route("/contacts/edit/tags", put(add_tags))
        .route("/contacts/delete/tags", put(remove_tags))
        .route("/contacts/companies/list", post(list_companies))
        .route("/contacts/email/note/add", post(add_note_by_email))
        .route("/opportunity", get(list_deals).post(create_deal))
        .route("/opportunity/{id}", get(get_deal).delete(delete_deal))
        .route("/opportunity/{id}/notes", get(deal_notes))
        .route("/opportunity/partial-update", put(update_deal))
        .route("/opportunity/deals/notes", put(create_deal_note))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).delete(delete_task))
        .route("/tasks/partial-update", put(update_task))
        .route("/notes", post(create_note))
        .route("/filters/filter/dynamic-filter", post(dynamic_filter))
        .layer(middleware::from_fn_with_state(expected, require_basic_auth))
        .with_state(db);

    Router::new().nest("/dev/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Settings::default()).await
}

pub async fn run_with(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    info!(addr = ?listener.local_addr().ok(), "mock CRM listening");
    axum::serve(listener, app_with(settings)).await
}

async fn require_basic_auth(State(expected): State<Arc<String>>, request: Request, next: Next) -> Response {
    let presented = request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        debug!(uri = %request.uri(), "rejecting unauthenticated request");
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

// --- helpers ---

#[derive(Debug, Default, Deserialize)]
struct Page {
    page_size: Option<usize>,
    cursor: Option<String>,
}

fn id_of(record: &Value) -> i64 {
    record.get("id").and_then(Value::as_i64).unwrap_or_default()
}

fn email_of(contact: &Value) -> Option<&str> {
    contact
        .get("properties")?
        .as_array()?
        .iter()
        .find(|p| p.get("name").and_then(Value::as_str).is_some_and(|n| n.eq_ignore_ascii_case("email")))?
        .get("value")?
        .as_str()
}

fn strings_of(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

fn has_string(record: &Value, key: &str, wanted: &str) -> bool {
    strings_of(record, key).iter().any(|v| v == wanted)
}

fn found(record: Option<Value>) -> Response {
    match record {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn listing(records: Vec<Value>) -> Response {
    if records.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(records).into_response()
    }
}

/// One page of `records` after `page.cursor`, with the continuation cursor
/// on the last element when more remain.
fn paginate<'a>(records: impl Iterator<Item = &'a Value>, page: &Page) -> Vec<Value> {
    let after: i64 = page.cursor.as_deref().and_then(|c| c.parse().ok()).unwrap_or_default();
    let size = page.page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE);

    let mut rest = records.filter(|r| id_of(r) > after);
    let mut out: Vec<Value> = rest.by_ref().take(size).cloned().collect();
    if rest.next().is_some() {
        if let Some(last) = out.last_mut() {
            let cursor = id_of(last).to_string();
            last["cursor"] = json!(cursor);
        }
    }
    out
}

/// Copies every field of `patch` except `id` onto `record`.
fn merge(record: &mut Value, patch: &Value) {
    if let (Some(target), Some(source)) = (record.as_object_mut(), patch.as_object()) {
        for (key, value) in source.iter().filter(|(k, _)| k.as_str() != "id") {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn json_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, StatusCode> {
    match payload {
        Ok(Json(value)) if value.is_object() => Ok(value),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

/// Task reads and write echoes list linked contacts and notes as records;
/// writes send them as ids.
fn present_task(task: &Value) -> Value {
    let mut task = task.clone();
    for key in ["contacts", "notes"] {
        if let Some(ids) = task.get(key).and_then(Value::as_array) {
            let linked: Vec<Value> = ids
                .iter()
                .filter_map(|id| id.as_str()?.parse::<i64>().ok())
                .map(|id| json!({ "id": id }))
                .collect();
            task[key] = Value::Array(linked);
        }
    }
    task
}

// --- contacts ---

async fn list_contacts(State(db): State<Db>, Query(page): Query<Page>) -> Response {
    let store = db.read().await;
    listing(paginate(store.contacts.values(), &page))
}

async fn create_contact(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let mut contact = match json_object(payload) {
        Ok(contact) => contact,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    if store.contacts.len() >= store.contact_limit {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }
    let id = store.assign_id();
    contact["id"] = json!(id);
    if contact.get("type").is_none() {
        contact["type"] = json!("PERSON");
    }
    store.contacts.insert(id, contact.clone());
    debug!(id, "contact created");
    Json(contact).into_response()
}

async fn get_contact(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(db.read().await.contacts.get(&id).cloned())
}

async fn delete_contact(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    match db.write().await.contacts.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn find_by_email(State(db): State<Db>, Path(email): Path<String>) -> Response {
    if !email.contains('@') {
        return StatusCode::BAD_REQUEST.into_response();
    }
    found(db.read().await.contact_by_email(&email).cloned())
}

#[derive(Debug, Deserialize)]
struct EmailIds {
    email_ids: String,
}

async fn find_by_emails(State(db): State<Db>, form: Result<Form<EmailIds>, FormRejection>) -> Response {
    let Ok(Form(input)) = form else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(emails) = serde_json::from_str::<Vec<String>>(&input.email_ids) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let store = db.read().await;
    let hits: Vec<Option<Value>> = emails.iter().map(|e| store.contact_by_email(e).cloned()).collect();
    Json(hits).into_response()
}

async fn edit_contact(db: Db, payload: Result<Json<Value>, JsonRejection>, edit: impl FnOnce(&mut Value, &Value)) -> Response {
    let patch = match json_object(payload) {
        Ok(patch) => patch,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    let Some(contact) = store.contacts.get_mut(&id_of(&patch)) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    edit(contact, &patch);
    Json(contact.clone()).into_response()
}

async fn edit_properties(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    edit_contact(db, payload, |contact, patch| {
        let incoming = patch.get("properties").and_then(Value::as_array).cloned().unwrap_or_default();
        let mut properties = contact.get("properties").and_then(Value::as_array).cloned().unwrap_or_default();
        for property in incoming {
            let name = property.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
            match properties.iter_mut().find(|p| {
                p.get("name").and_then(Value::as_str).is_some_and(|n| n.eq_ignore_ascii_case(&name))
            }) {
                Some(existing) => *existing = property,
                None => properties.push(property),
            }
        }
        contact["properties"] = Value::Array(properties);
    })
    .await
}

async fn edit_lead_score(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    edit_contact(db, payload, |contact, patch| {
        contact["lead_score"] = patch.get("lead_score").cloned().unwrap_or(json!(0));
    })
    .await
}

async fn edit_star_value(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    edit_contact(db, payload, |contact, patch| {
        contact["star_value"] = patch.get("star_value").cloned().unwrap_or(json!(0));
    })
    .await
}

async fn add_tags(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    edit_contact(db, payload, |contact, patch| {
        let mut tags = strings_of(contact, "tags");
        for tag in strings_of(patch, "tags") {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        contact["tags"] = json!(tags);
    })
    .await
}

async fn remove_tags(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    edit_contact(db, payload, |contact, patch| {
        let removed = strings_of(patch, "tags");
        let tags: Vec<String> = strings_of(contact, "tags").into_iter().filter(|t| !removed.contains(t)).collect();
        contact["tags"] = json!(tags);
    })
    .await
}

async fn list_companies(State(db): State<Db>, form: Result<Form<Page>, FormRejection>) -> Response {
    let page = form.map(|Form(page)| page).unwrap_or_default();
    let store = db.read().await;
    let companies = store.contacts.values().filter(|c| c.get("type") == Some(&json!("COMPANY")));
    listing(paginate(companies, &page))
}

async fn contact_notes(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    let id = id.to_string();
    listing(store.notes.values().filter(|n| has_string(n, "contact_ids", &id)).cloned().collect())
}

async fn unlink_contact_note(State(db): State<Db>, Path((id, note_id)): Path<(i64, i64)>) -> StatusCode {
    let mut store = db.write().await;
    let Some(note) = store.notes.get_mut(&note_id) else {
        return StatusCode::NOT_FOUND;
    };
    let id = id.to_string();
    if let Some(ids) = note.get_mut("contact_ids").and_then(Value::as_array_mut) {
        ids.retain(|v| v.as_str() != Some(id.as_str()));
    }
    StatusCode::NO_CONTENT
}

async fn contact_tasks(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    let id = id.to_string();
    listing(store.tasks.values().filter(|t| has_string(t, "contacts", &id)).map(present_task).collect())
}

// --- deals ---

async fn list_deals(State(db): State<Db>, Query(page): Query<Page>) -> Response {
    let store = db.read().await;
    listing(paginate(store.deals.values(), &page))
}

async fn create_deal(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let mut deal = match json_object(payload) {
        Ok(deal) => deal,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    let id = store.assign_id();
    deal["id"] = json!(id);
    store.deals.insert(id, deal.clone());
    Json(deal).into_response()
}

async fn get_deal(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(db.read().await.deals.get(&id).cloned())
}

async fn update_deal(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let patch = match json_object(payload) {
        Ok(patch) => patch,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    let Some(deal) = store.deals.get_mut(&id_of(&patch)) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    merge(deal, &patch);
    Json(deal.clone()).into_response()
}

async fn delete_deal(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    match db.write().await.deals.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn deal_notes(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    let id = id.to_string();
    listing(store.notes.values().filter(|n| has_string(n, "deal_ids", &id)).cloned().collect())
}

async fn create_deal_note(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let note = match json_object(payload) {
        Ok(note) => note,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    let linked = strings_of(&note, "deal_ids");
    if linked.is_empty() || !linked.iter().all(|id| id.parse::<i64>().is_ok_and(|id| store.deals.contains_key(&id))) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(store_note(&mut store, note)).into_response()
}

// --- tasks ---

async fn list_tasks(State(db): State<Db>) -> Response {
    let store = db.read().await;
    listing(store.tasks.values().map(present_task).collect())
}

async fn create_task(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let mut task = match json_object(payload) {
        Ok(task) => task,
        Err(status) => return status.into_response(),
    };
    if task.get("subject").and_then(Value::as_str).map_or(true, str::is_empty) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let mut store = db.write().await;
    let id = store.assign_id();
    task["id"] = json!(id);
    let saved = present_task(&task);
    store.tasks.insert(id, task);
    Json(saved).into_response()
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(db.read().await.tasks.get(&id).map(present_task))
}

async fn update_task(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    let patch = match json_object(payload) {
        Ok(patch) => patch,
        Err(status) => return status.into_response(),
    };
    let mut store = db.write().await;
    let Some(task) = store.tasks.get_mut(&id_of(&patch)) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    merge(task, &patch);
    Json(present_task(task)).into_response()
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    match db.write().await.tasks.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

// --- notes ---

fn store_note(store: &mut Store, mut note: Value) -> Value {
    let id = store.assign_id();
    note["id"] = json!(id);
    store.notes.insert(id, note.clone());
    note
}

async fn create_note(State(db): State<Db>, payload: Result<Json<Value>, JsonRejection>) -> Response {
    match json_object(payload) {
        Ok(note) => Json(store_note(&mut *db.write().await, note)).into_response(),
        Err(status) => status.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct NoteByEmail {
    email: String,
    note: String,
}

async fn add_note_by_email(State(db): State<Db>, form: Result<Form<NoteByEmail>, FormRejection>) -> Response {
    let Ok(Form(input)) = form else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(mut note) = serde_json::from_str::<Value>(&input.note) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut store = db.write().await;
    let Some(contact_id) = store.contact_by_email(&input.email).map(id_of) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    note["contact_ids"] = json!([contact_id.to_string()]);
    Json(store_note(&mut store, note)).into_response()
}

// --- filters ---

#[derive(Debug, Deserialize)]
struct FilterForm {
    page_size: Option<usize>,
    #[serde(rename = "filterJson")]
    filter_json: String,
}

#[derive(Debug, Deserialize)]
struct FilterRule {
    #[serde(rename = "LHS")]
    left: String,
    #[serde(rename = "CONDITION")]
    condition: String,
    #[serde(rename = "RHS")]
    right: String,
}

#[derive(Debug, Deserialize)]
struct Filter {
    #[serde(default)]
    rules: Vec<FilterRule>,
    #[serde(default)]
    or_rules: Vec<FilterRule>,
    contact_type: String,
}

impl FilterRule {
    fn matches(&self, record: &Value) -> bool {
        if self.condition != "EQUALS" {
            return false;
        }
        match record.get(&self.left) {
            Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(self.right.as_str())),
            Some(Value::String(s)) => *s == self.right,
            Some(other) => other.to_string() == self.right,
            None => false,
        }
    }
}

impl Filter {
    fn matches(&self, record: &Value) -> bool {
        self.rules.iter().all(|r| r.matches(record))
            && (self.or_rules.is_empty() || self.or_rules.iter().any(|r| r.matches(record)))
    }
}

async fn dynamic_filter(State(db): State<Db>, form: Result<Form<FilterForm>, FormRejection>) -> Response {
    let Ok(Form(input)) = form else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(filter) = serde_json::from_str::<Filter>(&input.filter_json) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let store = db.read().await;
    let pool: Box<dyn Iterator<Item = &Value> + '_> = match filter.contact_type.as_str() {
        "PERSON" | "COMPANY" => Box::new(
            store
                .contacts
                .values()
                .rev()
                .filter(|c| c.get("type").and_then(Value::as_str) == Some(filter.contact_type.as_str())),
        ),
        "OPPORTUNITY" => Box::new(store.deals.values().rev()),
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };
    let size = input.page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    listing(pool.filter(|r| filter.matches(r)).take(size).cloned().collect())
}
