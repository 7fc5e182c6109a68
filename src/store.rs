use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::models::{Chapter, PlannerData, Subject, Task, TaskUpdate};
use crate::utils::get_current_date_string;

/// Header line written to a day's journal before the first auto-logged
/// completion. `save_journal` keys its prepend behavior off this marker.
const COMPLETED_HEADER: &str = "Completed tasks:\n";
const COMPLETED_MARKER: &str = "Completed tasks:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read planner data: {0}")]
    Read(std::io::Error),
    #[error("Failed to write planner data: {0}")]
    Write(std::io::Error),
    #[error("Planner data is not valid JSON: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to encode planner data: {0}")]
    Serialize(serde_json::Error),
    #[error("Failed to create data directory: {0}")]
    Directory(std::io::Error),
}

/// Owns the planner document on disk. Every operation is a full
/// load-modify-write cycle over the JSON file; the internal mutex makes that
/// cycle exclusive, so two interleaved requests cannot clobber each other's
/// writes.
pub struct PlannerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PlannerStore {
    /// Create a store backed by the given file path. The file itself is
    /// created lazily on first access; the parent directory is created here.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StoreError::Directory)?;
            }
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current document, initializing an empty one on disk if the
    /// file is missing or empty.
    pub fn load(&self) -> Result<PlannerData, StoreError> {
        let _guard = self.guard();
        self.read_document()
    }

    /// Persist the full document, overwriting prior content.
    pub fn save(&self, data: &PlannerData) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.write_document(data)
    }

    /// Full document snapshot for the `/get_data` endpoint.
    pub fn data(&self) -> Result<PlannerData, StoreError> {
        self.load()
    }

    /// Append a new task with a fresh id. No validation of the name or the
    /// subject reference happens at this layer.
    pub fn add_task(
        &self,
        name: String,
        date: String,
        subject_id: Option<String>,
    ) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        data.tasks.push(Task::new(name, date, subject_id));
        self.write_document(&data)
    }

    /// Merge the given fields into the first task matching the update's id.
    /// A missing id is a silent no-op. Marking a task completed also logs a
    /// `- {name}` line to today's journal, at most once per task per day.
    pub fn update_task(&self, update: TaskUpdate) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;

        let mut completed_now: Option<(String, String)> = None;
        if let Some(task) = data.tasks.iter_mut().find(|t| t.id == update.id) {
            if let Some(name) = update.name {
                task.name = name;
            }
            if let Some(date) = update.date {
                task.date = date;
            }
            if let Some(subject_id) = update.subject_id {
                task.subject_id = Some(subject_id);
            }
            if let Some(completed) = update.completed {
                task.completed = completed;
            }
            if update.completed == Some(true) {
                completed_now = Some((task.id.clone(), task.name.clone()));
            }
        }

        if let Some((task_id, task_name)) = completed_now {
            let today = get_current_date_string();
            log_completion(&mut data, &task_id, &task_name, &today);
        }

        self.write_document(&data)
    }

    /// Remove the task with the matching id. Absent id is a no-op.
    pub fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        data.tasks.retain(|t| t.id != id);
        self.write_document(&data)
    }

    /// Count one completed focus session against the matching task.
    pub fn increment_pomodoro(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        if let Some(task) = data.tasks.iter_mut().find(|t| t.id == id) {
            task.pomodoro_sessions += 1;
        }
        self.write_document(&data)
    }

    pub fn add_subject(&self, name: String) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        data.subjects.push(Subject::new(name));
        self.write_document(&data)
    }

    /// Remove the subject and, implicitly, all its chapters. Tasks that
    /// referenced the subject keep their now-dangling `subjectId`.
    pub fn delete_subject(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        data.subjects.retain(|s| s.id != id);
        self.write_document(&data)
    }

    /// Append a chapter to the matching subject. An unknown subject id is a
    /// silent no-op that still reports success to the caller.
    pub fn add_chapter(&self, subject_id: &str, chapter_name: String) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        if let Some(subject) = data.subjects.iter_mut().find(|s| s.id == subject_id) {
            subject.chapters.push(Chapter::new(chapter_name));
        }
        self.write_document(&data)
    }

    /// Remove a chapter from the matching subject. No-op when either id is
    /// absent.
    pub fn delete_chapter(&self, subject_id: &str, chapter_id: &str) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        if let Some(subject) = data.subjects.iter_mut().find(|s| s.id == subject_id) {
            subject.chapters.retain(|c| c.id != chapter_id);
        }
        self.write_document(&data)
    }

    /// The stored journal entry for a date key, or an empty string.
    pub fn journal_entry(&self, date_key: &str) -> Result<String, StoreError> {
        let _guard = self.guard();
        let data = self.read_document()?;
        Ok(data.journal.get(date_key).cloned().unwrap_or_default())
    }

    /// Write a journal entry under today's date key. The date is computed
    /// here, not supplied by the caller, so entries cannot be back-dated.
    ///
    /// If today's entry already carries auto-logged completions (it contains
    /// the `Completed tasks:` marker), the new text is prepended above them
    /// with a blank line between; otherwise the entry is replaced.
    pub fn save_journal(&self, entry: String) -> Result<(), StoreError> {
        let _guard = self.guard();
        let mut data = self.read_document()?;
        let today = get_current_date_string();

        let value = match data.journal.get(&today) {
            Some(existing) if existing.contains(COMPLETED_MARKER) => {
                format!("{entry}\n\n{existing}")
            }
            _ => entry,
        };
        data.journal.insert(today, value);

        self.write_document(&data)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock still wraps a valid guard; the document is always
        // re-read from disk at the start of the next cycle.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_document(&self) -> Result<PlannerData, StoreError> {
        let len = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        if len == 0 {
            let data = PlannerData::default();
            self.write_document(&data)?;
            return Ok(data);
        }

        let contents = fs::read_to_string(&self.path).map_err(StoreError::Read)?;
        serde_json::from_str(&contents).map_err(StoreError::Parse)
    }

    fn write_document(&self, data: &PlannerData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data).map_err(StoreError::Serialize)?;
        fs::write(&self.path, json).map_err(StoreError::Write)
    }
}

/// Append `- {name}` to today's journal unless this task id was already
/// logged today. Creates the entry with the `Completed tasks:` header when
/// today has no entry yet.
fn log_completion(data: &mut PlannerData, task_id: &str, task_name: &str, today: &str) {
    let logged = data.completion_log.entry(today.to_string()).or_default();
    if logged.iter().any(|id| id == task_id) {
        return;
    }
    logged.push(task_id.to_string());

    let entry = data
        .journal
        .entry(today.to_string())
        .or_insert_with(|| COMPLETED_HEADER.to_string());
    entry.push_str(&format!("- {task_name}\n"));
}
