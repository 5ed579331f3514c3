//! Transient notices ("toasts").

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

pub const COPIED: &str = "Copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy to clipboard!";
pub const NO_RESULTS: &str = "No results found!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(message: String, now: Instant, duration: Duration) -> Self {
        Self {
            message,
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one notice. Showing a new one replaces the current notice
/// together with its pending dismissal.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    duration: Duration,
    shown: usize,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            shown: 0,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::debug!("Notice: {}", message);
        self.current = Some(Notice::new(message, now, self.duration));
        self.shown += 1;
    }

    /// The visible notice, if it has not expired yet.
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop an expired notice.
    pub fn prune(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
    }

    /// Time until the visible notice disappears.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current(now)
            .map(|n| n.expires_at.saturating_duration_since(now))
    }

    /// Total notices shown since creation.
    pub fn shown_count(&self) -> usize {
        self.shown
    }
}
