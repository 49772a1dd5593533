//! Notification buffer drained by the embedding shell
//!
//! The console never renders; user-facing messages (validation failures,
//! write-path errors, success confirmations) queue up here and the shell
//! drains them into whatever toast/banner widget it uses.

use std::collections::VecDeque;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Warning,
    Error,
}

/// A queued user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// FIFO notification buffer
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, level: NotifyLevel, message: impl Into<String>) {
        self.entries.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Error, message);
    }

    /// Take all queued notifications, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.entries.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
