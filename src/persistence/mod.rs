pub mod backend;
pub mod codec;
pub mod files;
pub mod queue;
pub mod settings;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use codec::{parse_projects, parse_tasks, serialize_list, PROJECTS_KEY, TASKS_KEY};
pub use files::{atomic_write, ensure_data_dir, init_local_dir, FileBackend};
pub use queue::PersistQueue;
pub use settings::{load_settings, save_settings, Settings, SETTINGS_FILE};
