//! User-facing notifications raised by failed API calls.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationClass {
    SessionExpired,
    InsufficientPermissions,
    NotFound,
    Validation,
    ServerError,
    ConnectionError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub class: NotificationClass,
    pub message: String,
}

impl Notification {
    pub fn new(class: NotificationClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log; the default when no UI toast is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::warn!(class = ?notification.class, "{}", notification.message);
    }
}
