use serde::{Deserialize, Serialize};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in a conversation.
///
/// Wire shape is `{"text": "...", "isUser": true}`, with `"loading": true`
/// only on the in-flight assistant placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub loading: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            loading: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            loading: false,
        }
    }

    /// The transient "assistant is thinking" entry
    pub fn placeholder() -> Self {
        Self {
            text: String::new(),
            is_user: false,
            loading: true,
        }
    }

    pub fn role(&self) -> Role {
        if self.is_user {
            Role::User
        } else {
            Role::Assistant
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.loading
    }
}

/// One entry of the role-tagged history sent to the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

impl From<&Message> for HistoryEntry {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role(),
            text: msg.text.clone(),
        }
    }
}
