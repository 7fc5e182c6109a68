use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The whole persisted planner document. Loaded and saved atomically as a
/// unit; field names match the on-disk JSON and the HTTP wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerData {
    pub tasks: Vec<Task>,
    pub subjects: Vec<Subject>,
    /// Journal entries keyed by date (YYYY-MM-DD).
    pub journal: BTreeMap<String, String>,
    /// Task ids whose completion was already written to a given day's
    /// journal, keyed by date. Re-completing a task on the same day does not
    /// produce a duplicate line, while two distinct tasks that happen to
    /// share a name still each get one.
    #[serde(default)]
    pub completion_log: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Due date (YYYY-MM-DD), may be empty.
    pub date: String,
    /// Reference to a Subject id. Not enforced: a dangling reference is
    /// tolerated and rendered as "N/A" by the UI.
    pub subject_id: Option<String>,
    pub completed: bool,
    pub pomodoro_sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
}

/// Partial update for a task. Only these fields are updatable; unknown
/// fields in a request are rejected at deserialization instead of being
/// merged into the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskUpdate {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub subject_id: Option<String>,
    pub completed: Option<bool>,
}

impl Task {
    pub fn new(name: String, date: String, subject_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            date,
            subject_id,
            completed: false,
            pomodoro_sessions: 0,
        }
    }
}

impl Subject {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            chapters: Vec::new(),
        }
    }
}

impl Chapter {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
        }
    }
}
