use crate::domain::model::{Notification, NotificationLevel};
use crate::domain::ports::Notifier;
use std::sync::{Mutex, PoisonError};

/// 終端機上的提示訊息，一律寫到 stderr 讓 stdout 只有結果
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!("✅ {}", notification.message);
                eprintln!("✅ {}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::warn!("❌ {}", notification.message);
                eprintln!("❌ {}", notification.message);
            }
        }
    }
}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::error("Failed to get recommendation"));
        notifier.notify(Notification::success("Recommendation generated!"));

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].level, NotificationLevel::Error);
        assert_eq!(all[1].message, "Recommendation generated!");
        assert!(all[0].at <= all[1].at);
        assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Success));
    }
}
