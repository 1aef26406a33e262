use crate::style;
use std::sync::{Mutex, PoisonError};

/// User-visible notifications ("toasts") for backend actions.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// Neutral notice, e.g. a bulk action with nothing selected.
    fn message(&self, message: &str);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        style::success(message);
    }

    fn error(&self, message: &str) {
        style::error(message);
    }

    fn message(&self, message: &str) {
        style::status(message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
    Message(String),
}

/// Keeps notifications in memory; the dashboard drains them into the next
/// rendered page.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    items: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.items.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn push(&self, item: Notification) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }

    fn message(&self, message: &str) {
        self.push(Notification::Message(message.to_string()));
    }
}
