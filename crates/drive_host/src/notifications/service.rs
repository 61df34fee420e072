//! Notification service contracts, no-op adapter, and recording adapter.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for blocking, user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notification message and resolves once the user has seen it.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Notification service that keeps every `(title, body)` pair it receives.
pub struct RecordingNotificationService {
    sent: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingNotificationService {
    /// Returns the notifications dispatched so far, oldest first.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for RecordingNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.sent
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn recording_notification_service_keeps_messages_in_order() {
        let notifications = RecordingNotificationService::default();
        let obj: &dyn NotificationService = &notifications;

        block_on(obj.notify("Upload failed", "quota")).expect("notify");
        block_on(obj.notify("Delete failed", "gone")).expect("notify");

        assert_eq!(
            notifications.sent(),
            vec![
                ("Upload failed".to_string(), "quota".to_string()),
                ("Delete failed".to_string(), "gone".to_string()),
            ]
        );
    }
}
