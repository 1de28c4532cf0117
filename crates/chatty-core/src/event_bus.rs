//! Buffered event bus between the session/service and the UI.
//!
//! Single-threaded (WASM) with interior mutability. The UI drains it once per
//! frame; `StoreChanged` only signals "re-read the store", so back-to-back
//! copies collapse into one.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chatty_types::event::ChatEvent;

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.queue.borrow_mut();
        if event == ChatEvent::StoreChanged && queue.back() == Some(&ChatEvent::StoreChanged) {
            return;
        }
        queue.push_back(event);
    }

    /// Take everything queued since the last frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
