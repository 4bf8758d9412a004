use crate::classify::{LENIENT_LIST, SEND};
use crate::client::Client;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::Body;
use crate::types::{Task, TaskList, TaskUpsert};

impl Client {
    pub fn list_tasks(&self) -> Result<TaskList> {
        self.task_list("api/tasks")
    }

    pub fn get_contact_tasks(&self, contact_id: i64) -> Result<TaskList> {
        self.task_list(&format!("api/contacts/{contact_id}/tasks"))
    }

    /// Tasks due within the next `days` days. Anything below one day is
    /// treated as one.
    pub fn get_pending_tasks(&self, days: i32) -> Result<TaskList> {
        self.task_list(&format!("api/tasks/pending/{}", days.max(1)))
    }

    pub fn get_task_by_id(&self, id: i64) -> Result<Task> {
        self.find_by_id(&format!("api/tasks/{id}"))
    }

    /// Creates a task. Any id on `draft` is dropped; the server assigns one.
    ///
    /// The server echoes the stored task in its read shape, with contacts and
    /// notes expanded. An empty echo yields `Task::default()`.
    pub fn create_task(&self, mut draft: TaskUpsert) -> Result<Task> {
        draft.id = None;
        let saved = self.send::<_, Task>(HttpMethod::Post, "api/tasks", SEND, &draft)?;
        Ok(saved.unwrap_or_default())
    }

    pub fn update_task(&self, id: i64, mut draft: TaskUpsert) -> Result<Task> {
        draft.id = Some(id);
        let saved = self.send::<_, Task>(HttpMethod::Put, "api/tasks/partial-update", SEND, &draft)?;
        Ok(saved.unwrap_or_default())
    }

    pub fn delete_task(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/tasks/{id}"))
    }

    fn task_list(&self, route: &str) -> Result<TaskList> {
        self.list(HttpMethod::Get, route, Body::Empty, &[], LENIENT_LIST)
    }
}
