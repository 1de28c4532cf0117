//! Request and response bodies for the REST backend.

use serde::{Deserialize, Serialize};
use crate::message::{HistoryEntry, Message};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
}

/// Body of `POST /chatbot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatbotRequest {
    /// `{"message": "..."}` — only the latest user input
    Message { message: String },
    /// `{"history": [{"role": "user", "text": "..."}, ...]}`
    History { history: Vec<HistoryEntry> },
}

impl ChatbotRequest {
    /// Build a full-history request, skipping any loading placeholder
    pub fn from_history(messages: &[Message]) -> Self {
        ChatbotRequest::History {
            history: messages
                .iter()
                .filter(|m| !m.is_placeholder())
                .map(HistoryEntry::from)
                .collect(),
        }
    }
}

/// Response of `POST /chatbot`. A missing or blank `reply` is treated as
/// a failed round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatbotReply {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ChatbotReply {
    pub fn text(&self) -> Option<&str> {
        self.reply
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}

/// Error body used by the backend: `{"error": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Pull a human-readable message out of a non-2xx response body.
/// Prefers the JSON `error` field, falls back to the raw text.
pub fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}
