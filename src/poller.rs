//! Interval timer driving history polling.
//!
//! The timer runs only while the window is visible. Callers feed it the
//! current time once per frame and fetch history whenever `tick` fires.

use std::time::{Duration, Instant};

/// Whether the window can currently be seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug)]
pub struct PollTimer {
    interval: Duration,
    /// Last time the timer fired (or was started). None = stopped.
    last_fire: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.last_fire.is_some()
    }

    /// Start the timer. No-op when already running.
    pub fn start(&mut self, now: Instant) {
        if self.last_fire.is_none() {
            self.last_fire = Some(now);
        }
    }

    /// Stop the timer. No-op when already stopped.
    pub fn stop(&mut self) {
        self.last_fire = None;
    }

    pub fn set_visibility(&mut self, visibility: Visibility, now: Instant) {
        match visibility {
            Visibility::Visible => self.start(now),
            Visibility::Hidden => self.stop(),
        }
    }

    /// True when a full interval has passed since the last fire.
    ///
    /// Missed intervals collapse into a single fire.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_fire = Some(now);
                true
            }
            _ => false,
        }
    }
}
