use crate::domain::{filter_by_status, tasks_in_project, NewTask, Task, TaskStatus};
use crate::store::TaskStore;
use anyhow::{Context, Result};

/// Capture a task from the command line. Returns the new id, `None` for a blank title.
pub fn add_task(
    store: &mut TaskStore,
    title: &str,
    project: Option<&str>,
    context: Option<&str>,
    next: bool,
) -> Option<i64> {
    let project = project.unwrap_or_default();
    let context = context.unwrap_or_default();

    let new_task = NewTask {
        title: title.to_string(),
        status: if next {
            TaskStatus::NextAction
        } else {
            TaskStatus::Inbox
        },
        project: project.to_string(),
        context: context.to_string(),
    };

    let id = store.add_task(new_task)?;
    store.add_project(project);
    Some(id)
}

/// Tasks matching the optional status and project filters, in store order
pub fn select_tasks<'a>(
    tasks: &'a [Task],
    status: Option<&str>,
    project: Option<&str>,
) -> Result<Vec<&'a Task>> {
    let mut selected: Vec<&Task> = match status {
        Some(tag) => {
            let status = TaskStatus::from_tag(tag)
                .with_context(|| format!("Unknown status '{}'. Use inbox, project or next_action", tag))?;
            filter_by_status(tasks, status)
        }
        None => tasks.iter().collect(),
    };

    if let Some(project) = project {
        let in_project: Vec<i64> = tasks_in_project(tasks, project).iter().map(|t| t.id).collect();
        selected.retain(|t| in_project.contains(&t.id));
    }

    Ok(selected)
}

/// One line of `list` output
pub fn format_row(task: &Task) -> String {
    let mut row = format!("{:<12} {:>13}  {}", format!("[{}]", task.status.to_tag()), task.id, task.label());
    if task.completed {
        row.push_str("  (done)");
    }
    if !task.project.is_empty() {
        row.push_str(&format!("  Project: {}", task.project));
    }
    row
}
