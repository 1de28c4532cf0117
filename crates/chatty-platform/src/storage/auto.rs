//! Pick the token slot backend.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use chatty_core::ports::TokenStore;
use super::{LocalStorageTokenStore, MemoryTokenStore};

/// Open the best available token store.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_token_store(key: &str) -> Rc<dyn TokenStore> {
    match LocalStorageTokenStore::open(key) {
        Ok(local) => {
            log::info!("Token store: localStorage ({})", key);
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), token will not survive a reload", e);
            Rc::new(MemoryTokenStore::new())
        }
    }
}
