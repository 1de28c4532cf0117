use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Backend-assigned conversation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Whether a conversation's messages have been fetched.
///
/// The list endpoint returns headers only; the item endpoint returns the
/// full message sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationBody {
    HeaderOnly,
    Loaded(Vec<Message>),
}

/// A conversation as held in the client store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    pub heading: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub body: ConversationBody,
}

impl Conversation {
    pub fn is_loaded(&self) -> bool {
        matches!(self.body, ConversationBody::Loaded(_))
    }

    /// Loaded messages; empty for a header-only conversation
    pub fn messages(&self) -> &[Message] {
        match &self.body {
            ConversationBody::HeaderOnly => &[],
            ConversationBody::Loaded(messages) => messages,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last()
    }

    /// Persistable form. `None` until the messages are loaded, so a header
    /// never overwrites the remote body with an empty list.
    pub fn draft(&self) -> Option<ConversationDraft> {
        match &self.body {
            ConversationBody::HeaderOnly => None,
            ConversationBody::Loaded(messages) => Some(ConversationDraft {
                heading: self.heading.clone(),
                messages: messages.iter().filter(|m| !m.is_placeholder()).cloned().collect(),
            }),
        }
    }
}

/// List item returned by `GET /api/conversations`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHeader {
    pub id: ConversationId,
    pub heading: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ConversationHeader> for Conversation {
    fn from(h: ConversationHeader) -> Self {
        Self {
            id: h.id,
            heading: h.heading,
            updated_at: h.updated_at,
            body: ConversationBody::HeaderOnly,
        }
    }
}

/// Full conversation returned by `GET /api/conversations/{id}` and
/// `POST /api/conversations`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: ConversationId,
    pub heading: String,
    /// The backend encodes an empty list as `null`
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ConversationDto> for Conversation {
    fn from(dto: ConversationDto) -> Self {
        Self {
            id: dto.id,
            heading: dto.heading,
            updated_at: dto.updated_at,
            body: ConversationBody::Loaded(dto.messages.unwrap_or_default()),
        }
    }
}

/// Body of create (`POST`) and update (`PUT`) requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDraft {
    pub heading: String,
    pub messages: Vec<Message>,
}
