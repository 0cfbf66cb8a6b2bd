use crate::domain::Screen;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long a completed task fades before it is removed
    pub fade_ms: u64,
    pub use_emoji: bool,
    pub start_screen: Screen,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fade_ms: 1000,
            use_emoji: true,
            start_screen: Screen::Inbox,
        }
    }
}

/// Load settings, falling back to defaults when the file is missing or unreadable
pub fn load_settings<P: AsRef<Path>>(path: P) -> Settings {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Settings::default(),
    };

    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
