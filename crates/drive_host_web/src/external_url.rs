//! External URL host-service adapter for browser contexts.

use drive_host::{ExternalUrlFuture, ExternalUrlService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser external URL adapter that opens a new browsing context with `window.open`.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                return match window.open_with_url_and_target(url, "_blank") {
                    Ok(Some(_)) => Ok(()),
                    Ok(None) => Err(format!("popup blocked for `{url}`")),
                    Err(err) => Err(format!("window.open failed: {err:?}")),
                };
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = url;
                Ok(())
            }
        })
    }
}
