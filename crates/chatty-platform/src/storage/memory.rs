//! In-memory token slot.
//! Not persistent across page reloads; used when `localStorage` is blocked.

use std::cell::RefCell;
use chatty_core::ports::TokenStore;
use chatty_types::Result;

pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: RefCell::new(None),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.token.borrow_mut().take();
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
