//! Shared source of truth for tasks and projects.
//!
//! The store loads both lists once at startup and queues a full snapshot
//! write after every mutation. Read and write failures never reach callers:
//! unreadable data loads as empty, failed writes are logged and dropped.

use crate::domain::{IdGenerator, NewTask, Task, TaskStatus};
use crate::persistence::{
    parse_projects, parse_tasks, serialize_list, KeyValueBackend, PersistQueue, PROJECTS_KEY,
    TASKS_KEY,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct TaskStore {
    tasks: Vec<Task>,
    projects: Vec<String>,
    ids: IdGenerator,
    backend: Arc<dyn KeyValueBackend>,
    queue: PersistQueue,
    initialized: bool,
}

impl TaskStore {
    /// Empty store over `backend`; call `initialize` before use
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let queue = PersistQueue::spawn(backend.clone());
        Self {
            tasks: Vec::new(),
            projects: Vec::new(),
            ids: IdGenerator::new(),
            backend,
            queue,
            initialized: false,
        }
    }

    /// Load both lists from the backend. Runs once; later calls do nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.tasks = parse_tasks(self.read_key(TASKS_KEY).as_deref());
        self.projects = parse_projects(self.read_key(PROJECTS_KEY).as_deref());

        for task in &self.tasks {
            self.ids.observe(task.id);
        }

        info!(
            "Loaded {} tasks and {} projects",
            self.tasks.len(),
            self.projects.len()
        );
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{}', starting empty: {}", key, e);
                None
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the whole task list and persist it
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        for task in &tasks {
            self.ids.observe(task.id);
        }
        self.tasks = tasks;
        self.persist_tasks();
    }

    /// Replace the whole project list and persist it
    pub fn replace_projects(&mut self, projects: Vec<String>) {
        self.projects = projects;
        self.persist_projects();
    }

    /// Append a task. Blank titles are ignored and return `None`.
    pub fn add_task(&mut self, new_task: NewTask) -> Option<i64> {
        if !new_task.is_valid() {
            return None;
        }

        let Some(id) = self.ids.next_id() else {
            warn!("No task id left above {}, not adding task", i64::MAX);
            return None;
        };
        let mut task = Task::new(id, new_task.title, new_task.status);
        task.project = new_task.project.trim().to_string();
        task.context = new_task.context.trim().to_string();

        let mut tasks = self.tasks.clone();
        tasks.push(task);
        self.replace_tasks(tasks);
        Some(id)
    }

    /// Remove exactly the task with `id`
    pub fn delete_task(&mut self, id: i64) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.replace_tasks(tasks);
        true
    }

    pub fn set_status(&mut self, id: i64, status: TaskStatus) -> bool {
        self.update(id, |t| t.status = status)
    }

    /// Promote to next action with the given project and context
    pub fn assign_next_action(&mut self, id: i64, project: &str, context: &str) -> bool {
        self.update(id, |t| {
            t.status = TaskStatus::NextAction;
            t.project = project.trim().to_string();
            t.context = context.trim().to_string();
        })
    }

    /// Flag as done. The task stays listed until its owner removes it.
    pub fn mark_completed(&mut self, id: i64) -> bool {
        self.update(id, |t| t.completed = true)
    }

    /// Record a project name. Blank names and duplicates are ignored.
    pub fn add_project(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.projects.iter().any(|p| p == name) {
            return false;
        }
        let mut projects = self.projects.clone();
        projects.push(name.to_string());
        self.replace_projects(projects);
        true
    }

    /// Wait for queued writes to reach the backend
    pub fn flush(&self) {
        self.queue.flush();
    }

    fn update(&mut self, id: i64, apply: impl FnOnce(&mut Task)) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let mut tasks = self.tasks.clone();
        apply(&mut tasks[index]);
        self.replace_tasks(tasks);
        true
    }

    fn persist_tasks(&self) {
        match serialize_list(&self.tasks) {
            Ok(json) => self.queue.submit(TASKS_KEY, json),
            Err(e) => warn!("Failed to serialize tasks: {}", e),
        }
    }

    fn persist_projects(&self) {
        match serialize_list(&self.projects) {
            Ok(json) => self.queue.submit(PROJECTS_KEY, json),
            Err(e) => warn!("Failed to serialize projects: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter_by_status;
    use crate::persistence::backend::BackendError;
    use crate::persistence::{FileBackend, MemoryBackend};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn create_test_store() -> (TaskStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = TaskStore::new(backend.clone());
        store.initialize();
        (store, backend)
    }

    #[test]
    fn test_first_launch_is_empty() {
        let (store, _) = create_test_store();
        assert!(store.tasks().is_empty());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_malformed_storage_is_empty() {
        let backend = Arc::new(MemoryBackend::with_entries([
            (TASKS_KEY, "not json"),
            (PROJECTS_KEY, "[\"Work\""),
        ]));
        let mut store = TaskStore::new(backend);
        store.initialize();

        assert!(store.tasks().is_empty());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_add_task_grows_by_one() {
        let (mut store, _) = create_test_store();
        let id = store.add_task(NewTask::inbox("Buy milk"));

        assert!(id.is_some());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Buy milk");
        assert_eq!(store.tasks()[0].status, TaskStatus::Inbox);
    }

    #[test]
    fn test_blank_title_is_noop() {
        let (mut store, _) = create_test_store();
        store.add_task(NewTask::inbox("Keep"));

        assert_eq!(store.add_task(NewTask::inbox("")), None);
        assert_eq!(store.add_task(NewTask::inbox("   ")), None);
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_ids_unique_in_quick_succession() {
        let (mut store, _) = create_test_store();
        for i in 0..50 {
            store.add_task(NewTask::inbox(format!("Task {}", i)));
        }

        let ids: HashSet<i64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_ids_stay_above_loaded() {
        let future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let stored = format!(
            r#"[{{"id":{},"title":"From later","status":"inbox","completed":false,"project":"","context":""}}]"#,
            future
        );
        let backend = Arc::new(MemoryBackend::with_entries([(TASKS_KEY, stored)]));
        let mut store = TaskStore::new(backend);
        store.initialize();

        let id = store.add_task(NewTask::inbox("Now")).unwrap();
        assert!(id > future);
    }

    #[test]
    fn test_move_between_inbox_and_project() {
        let (mut store, _) = create_test_store();
        let id = store.add_task(NewTask::inbox("Plan trip")).unwrap();

        let inbox = filter_by_status(store.tasks(), TaskStatus::Inbox);
        assert!(inbox.iter().any(|t| t.id == id));

        assert!(store.set_status(id, TaskStatus::Project));
        assert!(filter_by_status(store.tasks(), TaskStatus::Inbox).is_empty());
        let projects = filter_by_status(store.tasks(), TaskStatus::Project);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, id);
    }

    #[test]
    fn test_assign_next_action() {
        let (mut store, _) = create_test_store();
        let id = store.add_task(NewTask::inbox("Call plumber")).unwrap();

        assert!(store.assign_next_action(id, "Home", "@phone"));
        let task = store.get(id).unwrap();
        assert_eq!(task.status, TaskStatus::NextAction);
        assert_eq!(task.project, "Home");
        assert_eq!(task.context, "@phone");
    }

    #[test]
    fn test_project_reference_not_checked() {
        let (mut store, _) = create_test_store();
        let id = store.add_task(NewTask::inbox("Orphan")).unwrap();

        assert!(store.assign_next_action(id, "Unknown", ""));
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_mark_completed_then_remove() {
        let (mut store, _) = create_test_store();
        let id = store
            .add_task(NewTask::next_action("Water plants", "", "@home"))
            .unwrap();

        assert!(store.mark_completed(id));
        assert!(store.get(id).unwrap().completed);
        assert_eq!(store.tasks().len(), 1);

        assert!(store.delete_task(id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_delete_leaves_others() {
        let (mut store, _) = create_test_store();
        let a = store.add_task(NewTask::inbox("A")).unwrap();
        let b = store.add_task(NewTask::inbox("B")).unwrap();
        let c = store.add_task(NewTask::inbox("C")).unwrap();
        let before: Vec<Task> = store.tasks().to_vec();

        assert!(store.delete_task(b));
        assert_eq!(store.tasks(), &[before[0].clone(), before[2].clone()][..]);
        assert_eq!(store.tasks()[0].id, a);
        assert_eq!(store.tasks()[1].id, c);

        assert!(!store.delete_task(b));
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn test_unknown_id_mutations_are_noops() {
        let (mut store, _) = create_test_store();
        store.add_task(NewTask::inbox("Only"));

        assert!(!store.set_status(42, TaskStatus::Project));
        assert!(!store.mark_completed(42));
        assert!(!store.assign_next_action(42, "P", "@c"));
        assert_eq!(store.tasks()[0].status, TaskStatus::Inbox);
    }

    #[test]
    fn test_add_project_dedup() {
        let (mut store, _) = create_test_store();
        assert!(store.add_project("Work"));
        assert!(store.add_project("Home"));
        assert!(!store.add_project("Work"));
        assert!(!store.add_project("  "));
        assert_eq!(store.projects(), &["Work".to_string(), "Home".to_string()][..]);
    }

    #[test]
    fn test_mutations_persist_snapshot() {
        let (mut store, backend) = create_test_store();
        store.add_task(NewTask::inbox("Persist me"));
        store.add_project("Work");
        store.flush();

        let tasks = parse_tasks(backend.get(TASKS_KEY).unwrap().as_deref());
        assert_eq!(tasks, store.tasks().to_vec());
        let projects = parse_projects(backend.get(PROJECTS_KEY).unwrap().as_deref());
        assert_eq!(projects, vec!["Work".to_string()]);
    }

    #[test]
    fn test_replace_lists() {
        let (mut store, backend) = create_test_store();
        let tasks = vec![
            Task::new(10, "Ten".to_string(), TaskStatus::Project),
            Task::new(11, "Eleven".to_string(), TaskStatus::Inbox),
        ];
        store.replace_tasks(tasks.clone());
        store.replace_projects(vec!["Z".to_string(), "A".to_string()]);
        store.flush();

        assert_eq!(store.tasks(), &tasks[..]);
        assert_eq!(parse_tasks(backend.get(TASKS_KEY).unwrap().as_deref()), tasks);
        assert_eq!(store.projects(), &["Z".to_string(), "A".to_string()][..]);
    }

    #[test]
    fn test_reload_from_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let id;
        {
            let mut store = TaskStore::new(Arc::new(FileBackend::new(temp_dir.path())));
            store.initialize();
            id = store.add_task(NewTask::next_action("Ship it", "Work", "@office")).unwrap();
            store.add_project("Work");
        }

        let mut store = TaskStore::new(Arc::new(FileBackend::new(temp_dir.path())));
        store.initialize();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, id);
        assert_eq!(store.tasks()[0].context, "@office");
        assert_eq!(store.projects(), &["Work".to_string()][..]);
    }

    struct UnreadableBackend;

    impl KeyValueBackend for UnreadableBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, BackendError> {
            Err(BackendError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn test_backend_read_error_is_empty() {
        let mut store = TaskStore::new(Arc::new(UnreadableBackend));
        store.initialize();

        assert!(store.tasks().is_empty());
        assert!(store.projects().is_empty());

        // Still usable after the failed load
        assert!(store.add_task(NewTask::inbox("After failure")).is_some());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_add_task_after_max_id_is_rejected() {
        let stored = format!(
            r#"[{{"id":{},"title":"Last","status":"inbox","completed":false,"project":"","context":""}}]"#,
            i64::MAX
        );
        let backend = Arc::new(MemoryBackend::with_entries([(TASKS_KEY, stored)]));
        let mut store = TaskStore::new(backend);
        store.initialize();
        assert_eq!(store.tasks()[0].id, i64::MAX);

        assert_eq!(store.add_task(NewTask::inbox("next")), None);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, i64::MAX);
    }

    #[test]
    fn test_project_and_context_trimmed_like_project_list() {
        let (mut store, _) = create_test_store();
        let id = store
            .add_task(NewTask::next_action("Plan sprint", " Work ", " @office "))
            .unwrap();
        store.add_project(" Work ");

        let task = store.get(id).unwrap();
        assert_eq!(task.project, "Work");
        assert_eq!(task.context, "@office");
        assert_eq!(store.projects(), &[task.project.clone()][..]);

        let other = store.add_task(NewTask::inbox("Call")).unwrap();
        assert!(store.assign_next_action(other, "  Home", "@phone  "));
        assert_eq!(store.get(other).unwrap().project, "Home");
        assert_eq!(store.get(other).unwrap().context, "@phone");
    }

    #[test]
    fn test_initialize_runs_once() {
        let (mut store, backend) = create_test_store();
        store.add_task(NewTask::inbox("In memory"));
        backend.set(TASKS_KEY, "[]").unwrap();

        store.initialize();
        assert_eq!(store.tasks().len(), 1);
    }
}
