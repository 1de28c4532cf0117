//! Chat service — async operations over the shared store.
//!
//! Each operation wraps one round trip in pending/fulfilled/rejected actions.
//! Store borrows are never held across an `.await`, so the UI can keep
//! rendering while a request is in flight.
//!
//! Sending a message runs the per-conversation reply state machine:
//! 1. append the user message (creating the conversation if none is active)
//! 2. append the loading placeholder (Idle → AwaitingReply)
//! 3. call the assistant
//! 4. replace the placeholder with the reply (→ Resolved) or an apology (→ Failed)
//! 5. on success, persist the conversation

use std::rc::Rc;

use chatty_types::{
    ChatError, Result,
    api::ChatbotRequest,
    config::AssistantPayload,
    conversation::{ConversationDraft, ConversationId},
    event::{ChatEvent, Route},
    message::Message,
};
use crate::event_bus::EventBus;
use crate::ports::ChatApiPort;
use crate::session::{AuthSession, SessionChange};
use crate::store::{ChatAction, SharedStore};

pub const EMPTY_REPLY_APOLOGY: &str = "Sorry, I received an empty response.";
pub const ERROR_APOLOGY: &str = "Sorry, I ran into an error.";

/// Result of a send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, or a send is already in flight; nothing went over the wire
    Ignored,
    /// The assistant replied and the reply was appended
    Replied(ConversationId),
    /// The apology was appended in place of a reply
    Failed(ConversationId),
}

#[derive(Clone)]
pub struct ChatService {
    store: SharedStore,
    api: Rc<dyn ChatApiPort>,
    session: AuthSession,
    event_bus: EventBus,
    payload: AssistantPayload,
}

impl ChatService {
    pub fn new(
        store: SharedStore,
        api: Rc<dyn ChatApiPort>,
        session: AuthSession,
        event_bus: EventBus,
        payload: AssistantPayload,
    ) -> Self {
        Self {
            store,
            api,
            session,
            event_bus,
            payload,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn dispatch(&self, action: ChatAction) {
        self.store.borrow_mut().dispatch(action);
        self.event_bus.emit(ChatEvent::StoreChanged);
    }

    // ─── Local actions ───────────────────────────────────────

    /// "+ New Chat": the next send creates a conversation
    pub fn new_chat(&self) {
        self.dispatch(ChatAction::SetActive(None));
    }

    pub fn add_message_local(&self, chat_id: &ConversationId, message: Message) {
        self.dispatch(ChatAction::AddMessage {
            chat_id: chat_id.clone(),
            message,
        });
    }

    pub fn remove_last_message_local(&self, chat_id: &ConversationId) {
        self.dispatch(ChatAction::RemoveLastMessage(chat_id.clone()));
    }

    pub fn logout(&self) {
        self.dispatch(ChatAction::Clear);
        self.session.logout();
    }

    /// React to a token change made in another tab
    pub fn sync_session(&self) {
        match self.session.sync_from_storage() {
            Some(SessionChange::SignedOut) => {
                self.dispatch(ChatAction::Clear);
                self.event_bus.emit(ChatEvent::Navigate(Route::Login));
            }
            // Another account's conversations must not linger
            Some(SessionChange::Switched) => self.dispatch(ChatAction::Clear),
            Some(SessionChange::SignedIn) | None => {}
        }
    }

    // ─── Round trips ─────────────────────────────────────────

    pub async fn fetch_conversation_headers(&self) -> Result<()> {
        self.dispatch(ChatAction::HeadersPending);
        match self.guard(self.api.list_conversations().await) {
            Ok(headers) => {
                log::info!("Loaded {} conversation headers", headers.len());
                self.dispatch(ChatAction::HeadersLoaded(headers));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to fetch conversations: {}", e);
                self.reject(&e, ChatAction::HeadersFailed(format!("Failed to fetch conversations: {}", e)));
                Err(e)
            }
        }
    }

    pub async fn fetch_conversation_messages(&self, chat_id: &ConversationId) -> Result<()> {
        match self.guard(self.api.fetch_conversation(chat_id).await) {
            Ok(dto) => {
                self.dispatch(ChatAction::ConversationLoaded(dto));
                Ok(())
            }
            Err(e) => {
                self.reject(
                    &e,
                    ChatAction::ConversationLoadFailed {
                        chat_id: chat_id.clone(),
                        reason: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Activate a conversation, fetching its messages if only the header is known
    pub async fn select_conversation(&self, chat_id: &ConversationId) -> Result<()> {
        self.dispatch(ChatAction::SetActive(Some(chat_id.clone())));
        let needs_fetch = self.store.borrow().active_needs_messages() == Some(chat_id);
        if needs_fetch {
            self.fetch_conversation_messages(chat_id).await?;
        }
        Ok(())
    }

    pub async fn create_conversation(&self, heading: &str, messages: Vec<Message>) -> Result<ConversationId> {
        self.dispatch(ChatAction::CreatePending);
        let draft = ConversationDraft {
            heading: heading.to_string(),
            messages,
        };
        match self.guard(self.api.create_conversation(draft).await) {
            Ok(dto) => {
                let id = dto.id.clone();
                log::info!("Created conversation {}", id);
                self.dispatch(ChatAction::Created(dto));
                Ok(id)
            }
            Err(e) => {
                log::error!("Failed to create conversation: {}", e);
                self.reject(&e, ChatAction::CreateFailed(format!("Failed to create conversation: {}", e)));
                Err(e)
            }
        }
    }

    pub async fn delete_conversation(&self, chat_id: &ConversationId) -> Result<()> {
        match self.guard(self.api.delete_conversation(chat_id).await) {
            Ok(()) => {
                log::info!("Deleted conversation {}", chat_id);
                self.dispatch(ChatAction::Deleted(chat_id.clone()));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete conversation {}: {}", chat_id, e);
                self.reject(&e, ChatAction::DeleteFailed(format!("Failed to delete conversation: {}", e)));
                Err(e)
            }
        }
    }

    /// Persist heading and messages of a loaded conversation
    pub async fn update_conversation(&self, chat_id: &ConversationId) -> Result<()> {
        let draft = self
            .store
            .borrow()
            .conversation(chat_id)
            .and_then(|c| c.draft())
            .ok_or_else(|| ChatError::NotFound(chat_id.to_string()))?;

        match self.guard(self.api.update_conversation(chat_id, draft).await) {
            Ok(()) => {
                self.dispatch(ChatAction::Updated(chat_id.clone()));
                Ok(())
            }
            Err(e) => {
                self.reject(&e, ChatAction::UpdateFailed(format!("Failed to save conversation: {}", e)));
                Err(e)
            }
        }
    }

    // ─── Send ────────────────────────────────────────────────

    pub async fn send_and_await_reply(&self, input: &str) -> Result<SendOutcome> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let (active, creating) = {
            let store = self.store.borrow();
            (store.active_chat_id().cloned(), store.is_creating())
        };

        let chat_id = match active {
            None => {
                if creating {
                    return Ok(SendOutcome::Ignored);
                }
                self.create_conversation(text, vec![Message::user(text)]).await?
            }
            Some(id) => {
                let (in_flight, loaded) = {
                    let store = self.store.borrow();
                    let loaded = store.conversation(&id).is_some_and(|c| c.is_loaded());
                    (store.is_send_in_flight(&id), loaded)
                };
                if in_flight {
                    return Ok(SendOutcome::Ignored);
                }
                // Claimed before the first await so a second send sees it
                self.dispatch(ChatAction::ReplyPreparing(id.clone()));
                if !loaded {
                    if let Err(e) = self.fetch_conversation_messages(&id).await {
                        self.dispatch(ChatAction::ReplyAborted(id.clone()));
                        return Err(e);
                    }
                }
                self.add_message_local(&id, Message::user(text));
                id
            }
        };

        self.dispatch(ChatAction::ReplyStarted(chat_id.clone()));
        if !self.store.borrow().is_awaiting_reply(&chat_id) {
            log::warn!("Send to {} dropped: conversation changed while preparing", chat_id);
            self.dispatch(ChatAction::ReplyAborted(chat_id));
            return Ok(SendOutcome::Ignored);
        }
        let request = self.assistant_request(&chat_id, text);

        match self.guard(self.api.send_to_assistant(request).await) {
            Ok(reply) => match reply.text() {
                Some(reply_text) => {
                    self.dispatch(ChatAction::ReplyResolved {
                        chat_id: chat_id.clone(),
                        text: reply_text.to_string(),
                    });
                    if let Err(e) = self.update_conversation(&chat_id).await {
                        log::warn!("Reply shown but not saved for {}: {}", chat_id, e);
                    }
                    Ok(SendOutcome::Replied(chat_id))
                }
                None => {
                    log::error!("Assistant response was empty or malformed");
                    self.dispatch(ChatAction::ReplyFailed {
                        chat_id: chat_id.clone(),
                        reason: "empty reply".to_string(),
                        apology: EMPTY_REPLY_APOLOGY.to_string(),
                    });
                    Ok(SendOutcome::Failed(chat_id))
                }
            },
            Err(ChatError::Unauthorized) => Err(ChatError::Unauthorized),
            Err(e) => {
                log::error!("Error fetching assistant response: {}", e);
                self.dispatch(ChatAction::ReplyFailed {
                    chat_id: chat_id.clone(),
                    reason: e.to_string(),
                    apology: ERROR_APOLOGY.to_string(),
                });
                Ok(SendOutcome::Failed(chat_id))
            }
        }
    }

    fn assistant_request(&self, chat_id: &ConversationId, text: &str) -> ChatbotRequest {
        match self.payload {
            AssistantPayload::LatestMessage => ChatbotRequest::Message {
                message: text.to_string(),
            },
            AssistantPayload::FullHistory => {
                let store = self.store.borrow();
                let messages = store
                    .conversation(chat_id)
                    .map(|c| c.messages())
                    .unwrap_or_default();
                ChatbotRequest::from_history(messages)
            }
        }
    }

    /// A 401 on any authenticated call ends the session and drops local state.
    fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ChatError::Unauthorized) = &result {
            self.dispatch(ChatAction::Clear);
            self.session.expire();
        }
        result
    }

    /// Record a rejection, unless the session was just torn down.
    fn reject(&self, e: &ChatError, action: ChatAction) {
        if e.is_unauthorized() {
            return;
        }
        self.dispatch(action);
        self.event_bus.emit(ChatEvent::Error {
            message: e.to_string(),
        });
    }
}
