//! `localStorage` token slot.
//! Persistent across reloads and shared by every tab on the origin.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

use chatty_core::ports::TokenStore;
use chatty_types::{ChatError, Result};

pub struct LocalStorageTokenStore {
    storage: Storage,
    key: String,
}

impl LocalStorageTokenStore {
    /// Open the origin's `localStorage`. Fails when there is no window or
    /// the browser denies access (private mode, sandboxed iframe).
    pub fn open(key: &str) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| ChatError::Storage(js_error_message(&e)))?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;
        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Result<Option<String>> {
        let value = self
            .storage
            .get_item(&self.key)
            .map_err(|e| ChatError::Storage(js_error_message(&e)))?;
        Ok(value.filter(|t| !t.is_empty()))
    }

    fn set(&self, token: &str) -> Result<()> {
        self.storage
            .set_item(&self.key, token)
            .map_err(|e| ChatError::Storage(js_error_message(&e)))
    }

    fn clear(&self) -> Result<()> {
        self.storage
            .remove_item(&self.key)
            .map_err(|e| ChatError::Storage(js_error_message(&e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

/// Best-effort text for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
