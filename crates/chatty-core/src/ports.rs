//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chatty-core` (pure Rust).
//! Implementations live in `chatty-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chatty_types::{
    Result,
    api::{ChatbotReply, ChatbotRequest, LoginRequest, LoginResponse, SignupRequest},
    conversation::{ConversationDraft, ConversationDto, ConversationHeader, ConversationId},
};

// ─── REST API Port ───────────────────────────────────────────

/// The backend as seen by the client.
///
/// `login` and `signup` are public. Every other method is authenticated and
/// must return `ChatError::Unauthorized` when the backend answers 401.
#[async_trait(?Send)]
pub trait ChatApiPort {
    /// `POST /login`
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse>;

    /// `POST /signup`
    async fn signup(&self, req: SignupRequest) -> Result<()>;

    /// `GET /api/conversations`
    async fn list_conversations(&self) -> Result<Vec<ConversationHeader>>;

    /// `GET /api/conversations/{id}`
    async fn fetch_conversation(&self, id: &ConversationId) -> Result<ConversationDto>;

    /// `POST /api/conversations`
    async fn create_conversation(&self, draft: ConversationDraft) -> Result<ConversationDto>;

    /// `PUT /api/conversations/{id}`
    async fn update_conversation(&self, id: &ConversationId, draft: ConversationDraft) -> Result<()>;

    /// `DELETE /api/conversations/{id}`
    async fn delete_conversation(&self, id: &ConversationId) -> Result<()>;

    /// `POST /chatbot`
    async fn send_to_assistant(&self, req: ChatbotRequest) -> Result<ChatbotReply>;
}

// ─── Token Store Port ────────────────────────────────────────

/// The single persisted client-side slot: the bearer token.
/// Synchronous because `localStorage` is.
pub trait TokenStore {
    fn get(&self) -> Result<Option<String>>;

    fn set(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn has_token(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
