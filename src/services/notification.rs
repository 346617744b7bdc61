// src/services/notification.rs
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
}

/// User-visible notifications (the toasts of the chat client).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn show_success(&self, message: &str, title: &str) {
        self.notify(Notification {
            level: Level::Success,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn show_error(&self, message: &str, title: &str) {
        self.notify(Notification {
            level: Level::Error,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Prints notifications to stderr so they don't interleave with the chat log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// The single stderr line shown for a notification.
    pub fn line(n: &Notification) -> String {
        let tag = match n.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        format!("[{tag}] {}: {}", n.title, n.message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        eprintln!("{}", Self::line(&n));
    }
}

/// Keeps every notification in memory. Used by tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|n| n.level == Level::Error)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_carries_title_and_message() {
        let n = Notification {
            level: Level::Error,
            title: "Server Error".to_string(),
            message: "No answer from the bot.".to_string(),
        };
        assert_eq!(ConsoleNotifier::line(&n), "[error] Server Error: No answer from the bot.");
    }

    #[test]
    fn recorder_keeps_order_and_filters_errors() {
        let notifier = RecordingNotifier::new();
        notifier.show_success("Welcome, Alice!", "Chat created");
        notifier.show_error("listUsers failed", "UserService Error");

        assert_eq!(notifier.all().len(), 2);
        assert_eq!(notifier.all()[0].level, Level::Success);
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "UserService Error");
    }
}
