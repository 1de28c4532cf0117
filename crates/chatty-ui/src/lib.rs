//! egui screens for the chat client.
//!
//! Panels never perform I/O: they read the store, edit [`state::UiState`]
//! and return [`state::UiAction`] intents for the app to carry out.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
