//! Concrete adapter assembly for runtime wiring.

use std::rc::Rc;

use drive_host::{BackendConfig, HostServices};

use crate::{
    SupabaseClient, WebConfirmService, WebExternalUrlService, WebNotificationService,
};

/// Builds the browser host bundle around one explicitly constructed backend client.
///
/// An incomplete `config` still produces a working bundle; backend calls then fail and surface
/// through the usual error paths.
pub fn build_host_services(config: BackendConfig) -> HostServices {
    let client = SupabaseClient::new(config);
    HostServices {
        store: Rc::new(client.storage()),
        auth: Rc::new(client.auth()),
        external_urls: Rc::new(WebExternalUrlService),
        notifications: Rc::new(WebNotificationService),
        confirm: Rc::new(WebConfirmService),
    }
}
