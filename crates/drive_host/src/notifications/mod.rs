//! User-visible notification contracts.

mod service;

pub use service::{
    NoopNotificationService, NotificationFuture, NotificationService,
    RecordingNotificationService,
};
