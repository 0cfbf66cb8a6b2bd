use std::time::Duration;

/// Idle tick interval in milliseconds
pub const IDLE_TICK_MS: u64 = 250;

/// Tick interval while a completed task is fading out
pub const FADE_TICK_MS: u64 = 50;

/// Get tick duration; faster while fades run so dimming steps show
pub fn tick_duration(fading: bool) -> Duration {
    if fading {
        Duration::from_millis(FADE_TICK_MS)
    } else {
        Duration::from_millis(IDLE_TICK_MS)
    }
}
