//! Host-service bundle injected into the drive runtime.

use std::rc::Rc;

use crate::{
    AuthService, ConfirmService, ExternalUrlService, NoopAuthService, NoopConfirmService,
    NoopExternalUrlService, NoopNotificationService, NoopObjectStore, NotificationService,
    ObjectStoreService,
};

/// Runtime-selected collaborator bundle handed to the drive controller.
///
/// Adapter selection happens before this bundle crosses into `drive_runtime`, which keeps the
/// controller decoupled from browser and backend details.
#[derive(Clone)]
pub struct HostServices {
    /// Object store holding the drive's files.
    pub store: Rc<dyn ObjectStoreService>,
    /// Magic-link auth provider.
    pub auth: Rc<dyn AuthService>,
    /// External URL opening service.
    pub external_urls: Rc<dyn ExternalUrlService>,
    /// Blocking notification service.
    pub notifications: Rc<dyn NotificationService>,
    /// Confirmation prompt service.
    pub confirm: Rc<dyn ConfirmService>,
}

impl HostServices {
    /// Bundle of no-op adapters for unsupported targets.
    pub fn noop() -> Self {
        Self {
            store: Rc::new(NoopObjectStore),
            auth: Rc::new(NoopAuthService),
            external_urls: Rc::new(NoopExternalUrlService),
            notifications: Rc::new(NoopNotificationService),
            confirm: Rc::new(NoopConfirmService),
        }
    }
}
