use serde::{Deserialize, Serialize};

/// Workflow stage of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Inbox,
    Project,
    NextAction,
}

impl TaskStatus {
    /// Parse status from its stored name like "next_action"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "inbox" => Some(Self::Inbox),
            "project" => Some(Self::Project),
            "next_action" | "next" => Some(Self::NextAction),
            _ => None,
        }
    }

    /// Convert status to its stored name
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Project => "project",
            Self::NextAction => "next_action",
        }
    }
}

/// Top-level screens of the app, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Inbox,
    Projects,
    NextActions,
    AddTask,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Inbox,
            Screen::Projects,
            Screen::NextActions,
            Screen::AddTask,
        ]
    }

    /// Tab label
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Inbox => "Inbox",
            Screen::Projects => "Projects",
            Screen::NextActions => "Next Actions",
            Screen::AddTask => "Add Task",
        }
    }

    /// Status shown by list screens. `AddTask` has no list.
    pub fn status_filter(&self) -> Option<TaskStatus> {
        match self {
            Screen::Inbox => Some(TaskStatus::Inbox),
            Screen::Projects => Some(TaskStatus::Project),
            Screen::NextActions => Some(TaskStatus::NextAction),
            Screen::AddTask => None,
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Screen {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Screen {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Capturing,     // Typing a new inbox item
    AssigningNext, // "Assign Project & Context" form over the inbox
}
