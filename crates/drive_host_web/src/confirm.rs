//! Confirmation prompt adapter for browser contexts.

use drive_host::{ConfirmFuture, ConfirmService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser confirmation adapter backed by `window.confirm`. Declines when no window exists.
pub struct WebConfirmService;

impl ConfirmService for WebConfirmService {
    fn confirm<'a>(&'a self, message: &'a str) -> ConfirmFuture<'a, bool> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                return web_sys::window()
                    .and_then(|window| window.confirm_with_message(message).ok())
                    .unwrap_or(false);
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = message;
                false
            }
        })
    }
}
