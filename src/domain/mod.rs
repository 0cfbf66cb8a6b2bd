pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Screen, TaskStatus, UiMode};
pub use task::{IdGenerator, NewTask, Task};
pub use views::{done_badge, filter_by_status, status_counts, tasks_in_project};
