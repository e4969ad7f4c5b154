use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex};

/// Emits every decision as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification<'_>) {
        tracing::info!(
            account = notification.account_number(),
            rejected = notification.is_rejection(),
            "{notification}"
        );
    }
}

/// Keeps the rendered text of every notification. Clones share one buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification<'_>) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(notification.to_string());
        }
    }
}
