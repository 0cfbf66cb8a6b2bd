use crate::domain::Task;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Backend key holding the task list
pub const TASKS_KEY: &str = "tasks";
/// Backend key holding the project-name list
pub const PROJECTS_KEY: &str = "projects";

/// Serialize a full list as a JSON array
pub fn serialize_list<T: Serialize>(items: &[T]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Parse a stored JSON array. Absent or malformed input yields an empty list.
pub fn parse_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Discarding unreadable stored list: {}", e);
            Vec::new()
        }
    }
}

pub fn parse_tasks(raw: Option<&str>) -> Vec<Task> {
    parse_list(raw)
}

pub fn parse_projects(raw: Option<&str>) -> Vec<String> {
    parse_list(raw)
}
