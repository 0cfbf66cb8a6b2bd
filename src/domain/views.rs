use super::enums::TaskStatus;
use super::task::Task;

/// Tasks with the given status, in list order
pub fn filter_by_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

/// Tasks labelled with `project`
pub fn tasks_in_project<'a>(tasks: &'a [Task], project: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.project == project).collect()
}

/// Count of tasks per status: (inbox, project, next_action)
pub fn status_counts(tasks: &[Task]) -> (usize, usize, usize) {
    tasks.iter().fold((0, 0, 0), |(i, p, n), t| match t.status {
        TaskStatus::Inbox => (i + 1, p, n),
        TaskStatus::Project => (i, p + 1, n),
        TaskStatus::NextAction => (i, p, n + 1),
    })
}

/// Completion marker for list rows
pub fn done_badge(task: &Task, use_emoji: bool) -> &'static str {
    match (task.completed, use_emoji) {
        (true, true) => " ✅",
        (true, false) => " [x]",
        (false, _) => "",
    }
}
