pub mod memory;
pub mod local;
pub mod auto;
pub mod watch;

pub use memory::MemoryTokenStore;
pub use local::LocalStorageTokenStore;
pub use auto::auto_detect_token_store;
pub use watch::{watch_token_changes, TokenWatcher};
