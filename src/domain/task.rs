use super::enums::TaskStatus;
use serde::{Deserialize, Serialize};

/// A single task in the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in milliseconds, never reassigned
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub completed: bool,
    /// Project label, empty when unset
    #[serde(default)]
    pub project: String,
    /// Situational tag like "@home", empty when unset
    #[serde(default)]
    pub context: String,
}

impl Task {
    pub fn new(id: i64, title: String, status: TaskStatus) -> Self {
        Self {
            id,
            title,
            status,
            completed: false,
            project: String::new(),
            context: String::new(),
        }
    }

    /// Title plus "(context)" when a context is set
    pub fn label(&self) -> String {
        if self.context.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.context)
        }
    }
}

/// Fields supplied when capturing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub project: String,
    pub context: String,
}

impl NewTask {
    /// Inbox capture: no project, no context
    pub fn inbox(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::Inbox,
            project: String::new(),
            context: String::new(),
        }
    }

    /// Next action with optional project and context
    pub fn next_action(
        title: impl Into<String>,
        project: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::NextAction,
            project: project.into(),
            context: context.into(),
        }
    }

    /// Blank or whitespace-only titles are rejected
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Hands out strictly increasing millisecond ids
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure future ids stay above every id already in use
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    pub fn next_id(&mut self) -> Option<i64> {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Id for a creation at `now_ms`; bumps past the last one on collision.
    /// `None` once the id space above the last id is exhausted.
    pub fn next_at(&mut self, now_ms: i64) -> Option<i64> {
        let id = now_ms.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}
