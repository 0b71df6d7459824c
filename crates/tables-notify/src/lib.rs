//! Delivery of audit violations.
//!
//! Notification is best effort: callers log a [`NotifyError`] and move on.

mod error;
mod slack;

use std::sync::Mutex;

pub use error::NotifyError;
pub use slack::{DEFAULT_FOOTER, SlackAttachment, SlackConfig, SlackMessage, SlackNotifier};

/// Sink for per-violation messages.
pub trait Notifier {
    /// Deliver `reason` about the record identified by `target`.
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError>;
}

/// Writes violations to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError> {
        tracing::info!(target_id = %target, %reason, "notification suppressed");
        Ok(())
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(target, reason)` pairs in delivery order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| NotifyError::Unavailable("notification log lock poisoned".to_string()))?;
        sent.push((target.to_string(), reason.to_string()));
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError> {
        (**self).notify(target, reason)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError> {
        (**self).notify(target, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify("TABLE-1", "first").unwrap();
        notifier.notify("TABLE-2", "second").unwrap();

        assert_eq!(
            notifier.sent(),
            vec![
                ("TABLE-1".to_string(), "first".to_string()),
                ("TABLE-2".to_string(), "second".to_string()),
            ]
        );
    }

    #[test]
    fn test_log_notifier_never_fails() {
        assert!(LogNotifier.notify("TABLE-1", "reason").is_ok());
    }
}
