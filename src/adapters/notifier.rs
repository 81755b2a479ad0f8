use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use std::cell::{Cell, RefCell};

/// Routes notifications into the tracing pipeline: successes at `info`,
/// failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification<'_>) {
        if notification.is_failure() {
            tracing::warn!("❌ {}", notification);
        } else {
            tracing::info!("{}", notification);
        }
    }
}

/// Prints every notification on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification<'_>) {
        println!("{notification}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: &Notification<'_>) {}
}

/// Keeps the rendered messages in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: RefCell<Vec<String>>,
    failures: Cell<usize>,
}

impl MemoryNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.get()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
        self.failures.set(0);
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification<'_>) {
        if notification.is_failure() {
            self.failures.set(self.failures.get() + 1);
        }
        self.messages.borrow_mut().push(notification.to_string());
    }
}
