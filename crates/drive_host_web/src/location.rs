//! Browser location and cross-tab storage helpers used by the auth adapter.

use drive_host::AuthSubscription;

/// Returns the current URL fragment without the leading `#`.
pub fn current_fragment() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        let fragment = hash.trim_start_matches('#');
        if fragment.is_empty() {
            None
        } else {
            Some(fragment.to_string())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Removes the URL fragment after auth tokens were consumed from it.
pub fn clear_fragment() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash("");
        }
    }
}

/// Returns `origin + pathname` of the current page, used as the magic-link redirect target.
pub fn current_page_url() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let location = web_sys::window()?.location();
        let origin = location.origin().ok()?;
        let path = location.pathname().ok()?;
        Some(format!("{origin}{path}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Calls `on_change` whenever another tab writes `key` in `localStorage`.
///
/// The listener is removed when the returned subscription drops.
pub fn watch_storage_key(key: String, on_change: Box<dyn Fn()>) -> AuthSubscription {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};

        let Some(window) = web_sys::window() else {
            return AuthSubscription::detached();
        };
        let closure = Closure::<dyn Fn(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                if event.key().as_deref() == Some(key.as_str()) {
                    on_change();
                }
            },
        );
        if window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .is_err()
        {
            return AuthSubscription::detached();
        }
        AuthSubscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (key, on_change);
        AuthSubscription::detached()
    }
}
