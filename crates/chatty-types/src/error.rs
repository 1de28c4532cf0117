use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// HTTP 401 on an authenticated route
    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u32),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ChatError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ChatError::Unauthorized)
    }

    /// Message carried by a backend error response, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ChatError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
