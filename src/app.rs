use crate::domain::{filter_by_status, NewTask, Screen, Task, TaskStatus, UiMode};
use crate::fade::FadeTracker;
use crate::persistence::Settings;
use crate::store::TaskStore;
use std::time::{Duration, Instant};
use tracing::debug;

/// Field of an input form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Project,
    Context,
}

/// What submitting a form does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Add Task screen: title, project, context
    AddTask,
    /// Inbox "Assign Project & Context" for one task
    AssignNext { task_id: i64 },
}

/// Input form state shared by the Add Task screen and the assign form
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub title: String,
    pub project: String,
    pub context: String,
    pub editing_field: usize,
}

impl InputFormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            title: String::new(),
            project: String::new(),
            context: String::new(),
            editing_field: 0,
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            FormKind::AddTask => &[FormField::Title, FormField::Project, FormField::Context],
            FormKind::AssignNext { .. } => &[FormField::Project, FormField::Context],
        }
    }

    pub fn current_field(&self) -> FormField {
        let fields = self.fields();
        fields[self.editing_field % fields.len()]
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Project => &self.project,
            FormField::Context => &self.context,
        }
    }

    fn current_value_mut(&mut self) -> &mut String {
        match self.current_field() {
            FormField::Title => &mut self.title,
            FormField::Project => &mut self.project,
            FormField::Context => &mut self.context,
        }
    }

    pub fn next_field(&mut self) {
        self.editing_field = (self.editing_field + 1) % self.fields().len();
    }

    pub fn previous_field(&mut self) {
        let len = self.fields().len();
        self.editing_field = (self.editing_field + len - 1) % len;
    }

    pub fn add_char(&mut self, c: char) {
        self.current_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.current_value_mut().pop();
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.kind);
    }
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub settings: Settings,
    pub screen: Screen,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    /// Inbox quick-capture line
    pub capture_input: String,
    pub add_form: InputFormState,
    pub assign_form: Option<InputFormState>,
    pub fades: FadeTracker,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: TaskStore, settings: Settings) -> Self {
        let fades = FadeTracker::new(Duration::from_millis(settings.fade_ms));
        Self {
            store,
            screen: settings.start_screen,
            settings,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            capture_input: String::new(),
            add_form: InputFormState::new(FormKind::AddTask),
            assign_form: None,
            fades,
            status_message: None,
        }
    }

    /// Tasks shown on the current screen, in store order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.screen.status_filter() {
            Some(status) => filter_by_status(self.store.tasks(), status),
            None => Vec::new(),
        }
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        self.visible_tasks().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible list after it shrinks
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.selected_index = 0;
            self.status_message = None;
        }
    }

    pub fn next_screen(&mut self) {
        self.switch_screen(self.screen.next());
    }

    pub fn previous_screen(&mut self) {
        self.switch_screen(self.screen.previous());
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // Inbox quick capture

    pub fn start_capture(&mut self) {
        self.switch_screen(Screen::Inbox);
        self.capture_input.clear();
        self.ui_mode = UiMode::Capturing;
    }

    pub fn capture_add_char(&mut self, c: char) {
        self.capture_input.push(c);
    }

    pub fn capture_backspace(&mut self) {
        self.capture_input.pop();
    }

    /// Add the typed title to the inbox. Blank input keeps capture open.
    pub fn submit_capture(&mut self) {
        let title = std::mem::take(&mut self.capture_input);
        match self.store.add_task(NewTask::inbox(title)) {
            Some(id) => {
                debug!("Captured task {} to inbox", id);
                self.ui_mode = UiMode::Normal;
                self.selected_index = self.visible_tasks().len().saturating_sub(1);
                self.set_status("Added to inbox");
            }
            None => self.capture_input.clear(),
        }
    }

    pub fn cancel_capture(&mut self) {
        self.capture_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    // Inbox actions

    /// Move the selected inbox task to Projects
    pub fn move_selected_to_project(&mut self) {
        if self.screen != Screen::Inbox {
            return;
        }
        if let Some(id) = self.selected_task_id() {
            self.store.set_status(id, TaskStatus::Project);
            self.clamp_selection();
            self.set_status("Moved to projects");
        }
    }

    /// Open "Assign Project & Context" for the selected inbox task
    pub fn open_assign_form(&mut self) {
        if self.screen != Screen::Inbox {
            return;
        }
        if let Some(task_id) = self.selected_task_id() {
            self.assign_form = Some(InputFormState::new(FormKind::AssignNext { task_id }));
            self.ui_mode = UiMode::AssigningNext;
        }
    }

    pub fn submit_assign_form(&mut self) {
        if let Some(form) = self.assign_form.take() {
            if let FormKind::AssignNext { task_id } = form.kind {
                if self.store.assign_next_action(task_id, &form.project, &form.context) {
                    self.set_status("Moved to next actions");
                }
            }
        }
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    pub fn cancel_assign_form(&mut self) {
        self.assign_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// The form receiving keystrokes, if any
    pub fn active_form_mut(&mut self) -> Option<&mut InputFormState> {
        match self.ui_mode {
            UiMode::AssigningNext => self.assign_form.as_mut(),
            UiMode::Normal if self.screen == Screen::AddTask => Some(&mut self.add_form),
            _ => None,
        }
    }

    // Projects / Next Actions

    /// Move the selected project task to Next Actions
    pub fn move_selected_to_next_action(&mut self) {
        if self.screen != Screen::Projects {
            return;
        }
        if let Some(id) = self.selected_task_id() {
            self.store.set_status(id, TaskStatus::NextAction);
            self.clamp_selection();
            self.set_status("Moved to next actions");
        }
    }

    /// Mark the selected task done and start its fade-out
    pub fn complete_selected(&mut self, now: Instant) {
        if !matches!(self.screen, Screen::Projects | Screen::NextActions) {
            return;
        }
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.fades.is_fading(id) {
            return;
        }
        if self.store.mark_completed(id) {
            self.fades.start(id, now);
            self.set_status("Completed");
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.store.delete_task(id) {
                self.clamp_selection();
                self.set_status("Deleted");
            }
        }
    }

    // Add Task screen

    /// Add a next action from the Add Task form. Blank title is a no-op.
    pub fn submit_add_form(&mut self) {
        let form = &self.add_form;
        let new_task = NewTask::next_action(
            form.title.clone(),
            form.project.clone(),
            form.context.clone(),
        );
        let project = form.project.clone();

        if self.store.add_task(new_task).is_some() {
            self.store.add_project(&project);
            self.add_form.clear();
            self.set_status("Added to next actions");
        }
    }

    /// Remove tasks whose fade has finished
    pub fn tick(&mut self, now: Instant) {
        let finished = self.fades.take_finished(now);
        if finished.is_empty() {
            return;
        }
        for id in finished {
            self.store.delete_task(id);
        }
        self.clamp_selection();
    }

    /// Drop running fades straight to removal and wait for pending writes
    pub fn shutdown(&mut self) {
        let far_future = Instant::now() + Duration::from_millis(self.settings.fade_ms);
        self.tick(far_future);
        self.store.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryBackend;
    use std::sync::Arc;

    fn create_test_app() -> AppState {
        let mut store = TaskStore::new(Arc::new(MemoryBackend::new()));
        store.initialize();
        store.add_task(NewTask::inbox("Task 1"));
        store.add_task(NewTask::inbox("Task 2"));
        AppState::new(store, Settings::default())
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.visible_tasks().len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.screen, Screen::Inbox);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        // Can't go past the end
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_capture_adds_to_inbox() {
        let mut app = create_test_app();
        app.start_capture();
        for c in "Task 3".chars() {
            app.capture_add_char(c);
        }
        app.submit_capture();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.visible_tasks().len(), 3);
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_blank_capture_is_noop() {
        let mut app = create_test_app();
        app.start_capture();
        app.capture_add_char(' ');
        app.submit_capture();

        assert_eq!(app.ui_mode, UiMode::Capturing);
        assert_eq!(app.store.tasks().len(), 2);
    }

    #[test]
    fn test_move_to_project_changes_screen_lists() {
        let mut app = create_test_app();
        app.move_selected_to_project();

        assert_eq!(app.visible_tasks().len(), 1);
        app.switch_screen(Screen::Projects);
        assert_eq!(app.visible_tasks().len(), 1);
        assert_eq!(app.visible_tasks()[0].title, "Task 1");
    }

    #[test]
    fn test_assign_form_sets_project_and_context() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.open_assign_form();
        assert_eq!(app.ui_mode, UiMode::AssigningNext);

        let form = app.active_form_mut().unwrap();
        form.add_char('W');
        form.next_field();
        form.add_char('@');
        app.submit_assign_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_index, 0);
        let task = &app.store.tasks()[1];
        assert_eq!(task.status, TaskStatus::NextAction);
        assert_eq!(task.project, "W");
        assert_eq!(task.context, "@");
    }

    #[test]
    fn test_cancel_assign_form() {
        let mut app = create_test_app();
        app.open_assign_form();
        app.cancel_assign_form();

        assert!(app.assign_form.is_none());
        assert_eq!(app.visible_tasks().len(), 2);
    }

    #[test]
    fn test_complete_fades_then_removes() {
        let mut app = create_test_app();
        app.move_selected_to_project();
        app.switch_screen(Screen::Projects);

        let start = Instant::now();
        app.complete_selected(start);
        assert!(app.store.tasks()[0].completed);
        assert_eq!(app.store.tasks().len(), 2);

        app.tick(start + Duration::from_millis(500));
        assert_eq!(app.store.tasks().len(), 2);

        app.tick(start + Duration::from_millis(1000));
        assert_eq!(app.store.tasks().len(), 1);
        assert!(app.visible_tasks().is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_complete_ignored_on_inbox() {
        let mut app = create_test_app();
        app.complete_selected(Instant::now());
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn test_delete_selected() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.delete_selected();

        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Task 1");
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_form_creates_next_action() {
        let mut app = create_test_app();
        app.switch_screen(Screen::AddTask);
        {
            let form = app.active_form_mut().unwrap();
            for c in "Email Bob".chars() {
                form.add_char(c);
            }
            form.next_field();
            for c in "Work".chars() {
                form.add_char(c);
            }
        }
        app.submit_add_form();

        let task = app.store.tasks().last().unwrap();
        assert_eq!(task.title, "Email Bob");
        assert_eq!(task.status, TaskStatus::NextAction);
        assert_eq!(task.project, "Work");
        assert_eq!(app.store.projects(), &["Work".to_string()][..]);
        assert!(app.add_form.title.is_empty());
    }

    #[test]
    fn test_add_form_blank_title_is_noop() {
        let mut app = create_test_app();
        app.switch_screen(Screen::AddTask);
        app.add_form.project = "Work".to_string();
        app.submit_add_form();

        assert_eq!(app.store.tasks().len(), 2);
        assert!(app.store.projects().is_empty());
        assert_eq!(app.add_form.project, "Work");
    }

    #[test]
    fn test_form_field_cycle() {
        let mut form = InputFormState::new(FormKind::AssignNext { task_id: 1 });
        assert_eq!(form.current_field(), FormField::Project);
        form.next_field();
        assert_eq!(form.current_field(), FormField::Context);
        form.next_field();
        assert_eq!(form.current_field(), FormField::Project);
        form.previous_field();
        assert_eq!(form.current_field(), FormField::Context);
    }
}
