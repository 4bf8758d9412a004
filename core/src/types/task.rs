use serde::{Deserialize, Serialize};

use super::{is_default, ContactList, NoteList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Call,
    Email,
    FollowUp,
    Meeting,
    Milestone,
    Send,
    Tweet,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    High,
    #[default]
    Normal,
    Low,
}

/// Task progress. Moves forward only:
/// `YET_TO_START -> IN_PROGRESS -> COMPLETED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    YetToStart,
    InProgress,
    Completed,
}

impl TaskStatus {
    fn rank(self) -> u8 {
        match self {
            TaskStatus::YetToStart => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }

    pub fn successor(self) -> Option<Self> {
        match self {
            TaskStatus::YetToStart => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Completed),
            TaskStatus::Completed => None,
        }
    }

    /// True for strictly forward moves; staying put or going back is not a
    /// transition.
    pub fn can_transition_to(self, next: Self) -> bool {
        next.rank() > self.rank()
    }

    pub fn is_terminal(self) -> bool {
        self == TaskStatus::Completed
    }
}

/// Task as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_type: Option<TaskPriority>,
    #[serde(skip_serializing_if = "is_default")]
    pub due: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub created_time: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub is_complete: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(skip_serializing_if = "is_default")]
    pub progress: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "ContactList::is_empty")]
    pub contacts: ContactList,
    #[serde(skip_serializing_if = "NoteList::is_empty")]
    pub notes: NoteList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_owner: Option<TaskOwner>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskOwner {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "is_default")]
    pub is_admin: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub is_account_owner: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub is_disabled: bool,
}

/// Write shape for tasks. Every field except `id` is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub progress: i32,
    pub is_complete: bool,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    /// Due date, unix seconds.
    pub due: i64,
    pub task_ending_time: String,
    pub owner_id: i64,
    pub priority_type: TaskPriority,
    pub status: TaskStatus,
    pub description: String,
    #[serde(rename = "contacts")]
    pub contact_ids: Vec<String>,
    #[serde(rename = "notes")]
    pub note_ids: Vec<String>,
    pub deal_ids: Vec<String>,
}

impl TaskUpsert {
    pub fn new(subject: impl Into<String>, kind: TaskType, due: i64) -> Self {
        Self {
            subject: subject.into(),
            kind,
            due,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        use TaskStatus::*;
        assert!(YetToStart.can_transition_to(InProgress));
        assert!(YetToStart.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(YetToStart));
        assert!(!InProgress.can_transition_to(InProgress));
    }

    #[test]
    fn successor_chain_ends_at_completed() {
        let mut status = TaskStatus::default();
        let mut seen = vec![status];
        while let Some(next) = status.successor() {
            assert!(status.can_transition_to(next));
            status = next;
            seen.push(status);
        }
        assert_eq!(seen, [TaskStatus::YetToStart, TaskStatus::InProgress, TaskStatus::Completed]);
        assert!(status.is_terminal());
    }

    #[test]
    fn enums_use_vendor_spelling() {
        assert_eq!(serde_json::to_string(&TaskType::FollowUp).unwrap(), r#""FOLLOW_UP""#);
        assert_eq!(serde_json::to_string(&TaskStatus::YetToStart).unwrap(), r#""YET_TO_START""#);
        assert_eq!(serde_json::to_string(&TaskPriority::High).unwrap(), r#""HIGH""#);
    }

    #[test]
    fn upsert_writes_every_field_but_missing_id() {
        let json = serde_json::to_value(TaskUpsert::new("Call back", TaskType::Call, 1_700_000_000)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        for key in [
            "progress",
            "is_complete",
            "subject",
            "type",
            "due",
            "task_ending_time",
            "owner_id",
            "priority_type",
            "status",
            "description",
            "contacts",
            "notes",
            "deal_ids",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(json["type"], "CALL");
        assert_eq!(json["status"], "YET_TO_START");
    }

    #[test]
    fn read_shape_decodes_nested_owner() {
        let task: Task = serde_json::from_str(
            r#"{"id":11,"type":"MEETING","priority_type":"LOW","status":"IN_PROGRESS","task_owner":{"id":2,"is_admin":true}}"#,
        )
        .unwrap();
        assert_eq!(task.kind, Some(TaskType::Meeting));
        assert_eq!(task.status, Some(TaskStatus::InProgress));
        assert!(task.task_owner.unwrap().is_admin);
    }
}
