//! Cross-tab token change notifications.
//!
//! The browser fires `storage` on every *other* tab of the origin when a
//! `localStorage` entry changes. A login or logout in one tab therefore
//! reaches the rest through this listener.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{StorageEvent, Window};

use chatty_types::{ChatError, Result};
use super::local::js_error_message;

/// Keeps the `storage` listener registered; removes it on drop.
pub struct TokenWatcher {
    window: Window,
    callback: Closure<dyn FnMut(StorageEvent)>,
}

/// Call `on_change` whenever another tab writes or removes `key`.
/// A `localStorage.clear()` arrives with a null key and counts as a change.
pub fn watch_token_changes<F>(key: &str, mut on_change: F) -> Result<TokenWatcher>
where
    F: FnMut() + 'static,
{
    let window = web_sys::window()
        .ok_or_else(|| ChatError::JsInterop("No window object".to_string()))?;

    let key = key.to_string();
    let callback = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
        if affects_key(event.key().as_deref(), &key) {
            log::debug!("storage event for {}", key);
            on_change();
        }
    });

    window
        .add_event_listener_with_callback("storage", callback.as_ref().unchecked_ref())
        .map_err(|e| ChatError::JsInterop(js_error_message(&e)))?;

    Ok(TokenWatcher { window, callback })
}

impl Drop for TokenWatcher {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("storage", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove storage listener: {}", js_error_message(&e));
        }
    }
}

/// `None` is what the browser reports for `localStorage.clear()`
pub fn affects_key(changed: Option<&str>, watched: &str) -> bool {
    changed.map_or(true, |k| k == watched)
}
