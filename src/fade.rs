use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fade-out progress for one completed task
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    started_at: Instant,
    duration: Duration,
}

impl Fade {
    /// Remaining opacity, 1.0 at start down to 0.0 when finished
    pub fn opacity_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let ratio = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (1.0 - ratio).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Per-task fades keyed by task id. Entries exist only while a fade runs.
#[derive(Debug, Default)]
pub struct FadeTracker {
    fades: HashMap<i64, Fade>,
    duration: Duration,
}

impl FadeTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            fades: HashMap::new(),
            duration,
        }
    }

    /// Begin fading `id`; restarting an active fade keeps the original start
    pub fn start(&mut self, id: i64, now: Instant) {
        let duration = self.duration;
        self.fades.entry(id).or_insert(Fade {
            started_at: now,
            duration,
        });
    }

    /// Any fade still running
    pub fn is_active(&self) -> bool {
        !self.fades.is_empty()
    }

    pub fn is_fading(&self, id: i64) -> bool {
        self.fades.contains_key(&id)
    }

    /// Opacity for rendering; tasks without a fade are fully visible
    pub fn opacity(&self, id: i64, now: Instant) -> f64 {
        self.fades.get(&id).map_or(1.0, |f| f.opacity_at(now))
    }

    /// Drop finished fades and return their task ids, smallest first
    pub fn take_finished(&mut self, now: Instant) -> Vec<i64> {
        let mut finished: Vec<i64> = self
            .fades
            .iter()
            .filter(|(_, fade)| fade.is_finished(now))
            .map(|(id, _)| *id)
            .collect();
        finished.sort_unstable();
        for id in &finished {
            self.fades.remove(id);
        }
        finished
    }
}
