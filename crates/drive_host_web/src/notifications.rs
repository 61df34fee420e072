//! Blocking notification adapter for browser contexts.

use drive_host::{NotificationFuture, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by `window.alert`.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                let rendered = if body.trim().is_empty() {
                    title.to_string()
                } else {
                    format!("{title}: {body}")
                };
                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                return window
                    .alert_with_message(&rendered)
                    .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (title, body);
                Ok(())
            }
        })
    }
}
