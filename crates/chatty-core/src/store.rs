//! Conversation store — the client-side state container.
//!
//! All mutation goes through [`ChatStore::dispatch`]. Synchronous actions are
//! local edits; the rest record the outcome of a round trip performed by
//! `ChatService` (pending → fulfilled | rejected).
//!
//! Invariants held here rather than by call order:
//! - conversation ids are unique in the list
//! - the active id, when set, names a conversation in the list
//! - while a reply is awaited, the loading placeholder is the last message
//! - at most one send per conversation is in flight
//! - a header list requested before a create does not erase the created
//!   conversation

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chatty_types::{
    conversation::{Conversation, ConversationBody, ConversationDto, ConversationHeader, ConversationId},
    message::Message,
};

/// Store handle shared between the service and the UI.
pub type SharedStore = Rc<RefCell<ChatStore>>;

/// Bookkeeping for the conversation list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Per-conversation assistant round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyState {
    Idle,
    /// A send owns the conversation but has not appended the placeholder yet
    /// (messages being fetched)
    Preparing,
    AwaitingReply,
    Resolved,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum ChatAction {
    SetActive(Option<ConversationId>),
    AddMessage { chat_id: ConversationId, message: Message },
    RemoveLastMessage(ConversationId),
    Clear,

    HeadersPending,
    HeadersLoaded(Vec<ConversationHeader>),
    HeadersFailed(String),

    ConversationLoaded(ConversationDto),
    ConversationLoadFailed { chat_id: ConversationId, reason: String },

    CreatePending,
    Created(ConversationDto),
    CreateFailed(String),

    Deleted(ConversationId),
    DeleteFailed(String),

    Updated(ConversationId),
    UpdateFailed(String),

    /// Claim the conversation for a send before its first await
    ReplyPreparing(ConversationId),
    /// Release a claim when the send stops before `ReplyStarted`
    ReplyAborted(ConversationId),
    /// Append the loading placeholder and start awaiting
    ReplyStarted(ConversationId),
    /// Replace the placeholder with the assistant's reply
    ReplyResolved { chat_id: ConversationId, text: String },
    /// Replace the placeholder with a fixed apology
    ReplyFailed { chat_id: ConversationId, reason: String, apology: String },
}

#[derive(Debug, Clone)]
pub struct ChatStore {
    conversations: Vec<Conversation>,
    active_chat_id: Option<ConversationId>,
    status: LoadStatus,
    error: Option<String>,
    replies: HashMap<ConversationId, ReplyState>,
    creating: bool,
    /// Conversations created since the last `HeadersPending`
    created_since_list: Vec<ConversationId>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active_chat_id: None,
            status: LoadStatus::Idle,
            error: None,
            replies: HashMap::new(),
            creating: false,
            created_since_list: Vec::new(),
        }
    }

    pub fn shared() -> SharedStore {
        Rc::new(RefCell::new(Self::new()))
    }

    // ─── Selectors ───────────────────────────────────────────

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_chat_id(&self) -> Option<&ConversationId> {
        self.active_chat_id.as_ref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_chat_id.as_ref().and_then(|id| self.conversation(id))
    }

    pub fn conversation(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reply_state(&self, id: &ConversationId) -> ReplyState {
        self.replies.get(id).cloned().unwrap_or(ReplyState::Idle)
    }

    pub fn is_awaiting_reply(&self, id: &ConversationId) -> bool {
        matches!(self.replies.get(id), Some(ReplyState::AwaitingReply))
    }

    /// A send owns this conversation, whether still preparing or awaiting
    pub fn is_send_in_flight(&self, id: &ConversationId) -> bool {
        matches!(
            self.replies.get(id),
            Some(ReplyState::Preparing | ReplyState::AwaitingReply)
        )
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Whether the composer for the active (or not-yet-created) conversation
    /// must stay disabled
    pub fn is_send_blocked(&self) -> bool {
        match &self.active_chat_id {
            Some(id) => self.is_send_in_flight(id),
            None => self.creating,
        }
    }

    /// Active conversation whose messages still need fetching
    pub fn active_needs_messages(&self) -> Option<&ConversationId> {
        self.active_conversation()
            .filter(|c| !c.is_loaded())
            .map(|c| &c.id)
    }

    // ─── Reducer ─────────────────────────────────────────────

    pub fn dispatch(&mut self, action: ChatAction) {
        match action {
            ChatAction::SetActive(None) => {
                self.active_chat_id = None;
            }
            ChatAction::SetActive(Some(id)) => {
                if self.conversation(&id).is_some() {
                    self.active_chat_id = Some(id);
                } else {
                    log::warn!("Ignoring activation of unknown conversation {}", id);
                }
            }
            ChatAction::AddMessage { chat_id, message } => {
                self.add_message(&chat_id, message);
            }
            ChatAction::RemoveLastMessage(chat_id) => {
                if let Some(messages) = self.messages_mut(&chat_id) {
                    messages.pop();
                }
            }
            ChatAction::Clear => {
                *self = Self::new();
            }

            ChatAction::HeadersPending => {
                self.status = LoadStatus::Loading;
                self.created_since_list.clear();
            }
            ChatAction::HeadersLoaded(headers) => {
                self.status = LoadStatus::Succeeded;
                self.replace_with_headers(headers);
            }
            ChatAction::HeadersFailed(reason) => {
                self.status = LoadStatus::Failed;
                self.error = Some(reason);
            }

            ChatAction::ConversationLoaded(dto) => {
                let loaded: Conversation = dto.into();
                if self.is_awaiting_reply(&loaded.id) {
                    log::warn!("Dropping fetched body for {}: reply in flight", loaded.id);
                } else if let Some(slot) = self.conversations.iter_mut().find(|c| c.id == loaded.id) {
                    *slot = loaded;
                }
            }
            ChatAction::ConversationLoadFailed { chat_id, reason } => {
                log::error!("Failed to load messages for {}: {}", chat_id, reason);
                self.error = Some(reason);
            }

            ChatAction::CreatePending => {
                self.creating = true;
            }
            ChatAction::Created(dto) => {
                let created: Conversation = dto.into();
                self.conversations.retain(|c| c.id != created.id);
                self.active_chat_id = Some(created.id.clone());
                self.created_since_list.push(created.id.clone());
                self.conversations.insert(0, created);
                self.status = LoadStatus::Succeeded;
                self.creating = false;
            }
            ChatAction::CreateFailed(reason) => {
                self.creating = false;
                self.error = Some(reason);
            }

            ChatAction::Deleted(id) => {
                self.conversations.retain(|c| c.id != id);
                self.created_since_list.retain(|c| c != &id);
                self.replies.remove(&id);
                if self.active_chat_id.as_ref() == Some(&id) {
                    self.active_chat_id = self.conversations.first().map(|c| c.id.clone());
                }
            }
            ChatAction::DeleteFailed(reason) => {
                self.error = Some(reason);
            }

            ChatAction::Updated(_) => {}
            ChatAction::UpdateFailed(reason) => {
                self.error = Some(reason);
            }

            ChatAction::ReplyPreparing(chat_id) => {
                if self.is_send_in_flight(&chat_id) {
                    log::warn!("Send already in flight for {}", chat_id);
                } else if self.conversation(&chat_id).is_some() {
                    self.replies.insert(chat_id, ReplyState::Preparing);
                }
            }
            ChatAction::ReplyAborted(chat_id) => {
                if self.replies.get(&chat_id) == Some(&ReplyState::Preparing) {
                    self.replies.insert(chat_id, ReplyState::Idle);
                }
            }
            ChatAction::ReplyStarted(chat_id) => {
                if self.is_awaiting_reply(&chat_id) {
                    log::warn!("Reply already in flight for {}", chat_id);
                    return;
                }
                match self.messages_mut(&chat_id) {
                    Some(messages) => {
                        messages.push(Message::placeholder());
                        self.replies.insert(chat_id, ReplyState::AwaitingReply);
                    }
                    None => log::warn!("Cannot await reply for unloaded conversation {}", chat_id),
                }
            }
            ChatAction::ReplyResolved { chat_id, text } => {
                self.finish_reply(&chat_id, Message::assistant(text), ReplyState::Resolved);
            }
            ChatAction::ReplyFailed { chat_id, reason, apology } => {
                self.finish_reply(&chat_id, Message::assistant(apology), ReplyState::Failed(reason));
            }
        }
    }

    fn messages_mut(&mut self, id: &ConversationId) -> Option<&mut Vec<Message>> {
        self.conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .and_then(|c| match &mut c.body {
                ConversationBody::Loaded(messages) => Some(messages),
                ConversationBody::HeaderOnly => None,
            })
    }

    fn add_message(&mut self, chat_id: &ConversationId, message: Message) {
        if self.is_awaiting_reply(chat_id) {
            log::warn!("Ignoring message for {}: placeholder must stay last", chat_id);
            return;
        }
        match self.conversations.iter_mut().find(|c| &c.id == chat_id) {
            Some(conv) => match &mut conv.body {
                ConversationBody::Loaded(messages) => messages.push(message),
                ConversationBody::HeaderOnly => {
                    log::warn!("Ignoring message for {}: messages not loaded", chat_id);
                }
            },
            None => log::debug!("Ignoring message for unknown conversation {}", chat_id),
        }
    }

    fn finish_reply(&mut self, chat_id: &ConversationId, reply: Message, next: ReplyState) {
        let Some(messages) = self.messages_mut(chat_id) else {
            log::debug!("Reply for {} arrived after it left the store", chat_id);
            self.replies.remove(chat_id);
            return;
        };
        if messages.last().is_some_and(Message::is_placeholder) {
            messages.pop();
        }
        messages.push(reply);
        self.replies.insert(chat_id.clone(), next);
    }

    /// Swap the list for fresh headers. Bodies already loaded are kept when
    /// the header's timestamp is unchanged or a send is in flight.
    /// Conversations the response predates (created after `HeadersPending`,
    /// or with a send in flight) stay at the front.
    fn replace_with_headers(&mut self, headers: Vec<ConversationHeader>) {
        let order: Vec<ConversationId> = self.conversations.iter().map(|c| c.id.clone()).collect();
        let mut previous: HashMap<ConversationId, Conversation> = self
            .conversations
            .drain(..)
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut next: Vec<Conversation> = Vec::with_capacity(headers.len());
        for header in headers {
            if next.iter().any(|c| c.id == header.id) {
                log::warn!("Duplicate conversation id {} in list response", header.id);
                continue;
            }
            let keep = previous.remove(&header.id).filter(|old| {
                old.is_loaded()
                    && (old.updated_at == header.updated_at || self.is_send_in_flight(&old.id))
            });
            match keep {
                Some(mut old) => {
                    old.heading = header.heading;
                    next.push(old);
                }
                None => next.push(header.into()),
            }
        }

        let mut survivors: Vec<Conversation> = order
            .iter()
            .filter_map(|id| previous.remove(id))
            .filter(|c| self.created_since_list.contains(&c.id) || self.is_send_in_flight(&c.id))
            .collect();
        if !survivors.is_empty() {
            log::debug!("Keeping {} conversation(s) newer than the list response", survivors.len());
            survivors.append(&mut next);
            next = survivors;
        }

        self.replies.retain(|id, _| next.iter().any(|c| &c.id == id));
        self.conversations = next;

        let active_exists = self
            .active_chat_id
            .as_ref()
            .is_some_and(|id| self.conversation(id).is_some());
        if !active_exists {
            self.active_chat_id = self.conversations.first().map(|c| c.id.clone());
        }
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}
