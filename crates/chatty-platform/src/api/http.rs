//! REST gateway to the chat backend.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! Authenticated routes carry `Authorization: Bearer <token>` read from the
//! token store at request time; a 401 on those routes maps to
//! `ChatError::Unauthorized`, which the core turns into a forced logout.

use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use chatty_core::ports::{ChatApiPort, TokenStore};
use chatty_types::{
    ChatError, Result,
    api::{error_message_from_body, ChatbotReply, ChatbotRequest, LoginRequest, LoginResponse, SignupRequest},
    config::ClientConfig,
    conversation::{ConversationDraft, ConversationDto, ConversationHeader, ConversationId},
};

/// HTTP verbs used by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// Whether a route sits behind the JWT middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

pub struct HttpChatApi {
    config: ClientConfig,
    tokens: Rc<dyn TokenStore>,
}

impl HttpChatApi {
    pub fn new(config: ClientConfig, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            config: config.normalized(),
            tokens,
        }
    }

    fn builder(&self, verb: Verb, path: &str, access: Access) -> RequestBuilder {
        let url = self.config.url(path);
        let builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Put => Request::put(&url),
            Verb::Delete => Request::delete(&url),
        }
        .header("Accept", "application/json");

        if access == Access::Public {
            return builder;
        }
        match self.tokens.get() {
            Ok(Some(token)) => builder.header("Authorization", &bearer(&token)),
            Ok(None) => builder,
            Err(e) => {
                log::warn!("Token unreadable from {}: {}", self.tokens.backend_name(), e);
                builder
            }
        }
    }

    /// Send a request without a body
    async fn send_empty(&self, verb: Verb, path: &str, access: Access) -> Result<Response> {
        let request = self
            .builder(verb, path, access)
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;
        self.execute(request, access).await
    }

    /// Send a request with a JSON body
    async fn send_json<B: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        access: Access,
        body: &B,
    ) -> Result<Response> {
        let request = self
            .builder(verb, path, access)
            .json(body)
            .map_err(|e| ChatError::Serialization(e.to_string()))?;
        self.execute(request, access).await
    }

    async fn execute(&self, request: Request, access: Access) -> Result<Response> {
        let method = request.method();
        let url = request.url();
        log::debug!("{} {}", method, url);

        let response = with_timeout(self.config.request_timeout_ms, request.send())
            .await?
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        log::warn!("{} {} -> HTTP {}", method, url, status);
        Err(status_error(status, &text, access))
    }
}

#[async_trait(?Send)]
impl ChatApiPort for HttpChatApi {
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        let response = self.send_json(Verb::Post, "/login", Access::Public, &req).await?;
        decode(response).await
    }

    async fn signup(&self, req: SignupRequest) -> Result<()> {
        self.send_json(Verb::Post, "/signup", Access::Public, &req).await?;
        Ok(())
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationHeader>> {
        let response = self
            .send_empty(Verb::Get, "/api/conversations", Access::Authenticated)
            .await?;
        // An empty collection comes back as `null`
        let headers: Option<Vec<ConversationHeader>> = decode(response).await?;
        Ok(headers.unwrap_or_default())
    }

    async fn fetch_conversation(&self, id: &ConversationId) -> Result<ConversationDto> {
        let response = self
            .send_empty(Verb::Get, &conversation_path(id), Access::Authenticated)
            .await?;
        decode(response).await
    }

    async fn create_conversation(&self, draft: ConversationDraft) -> Result<ConversationDto> {
        let response = self
            .send_json(Verb::Post, "/api/conversations", Access::Authenticated, &draft)
            .await?;
        decode(response).await
    }

    async fn update_conversation(&self, id: &ConversationId, draft: ConversationDraft) -> Result<()> {
        self.send_json(Verb::Put, &conversation_path(id), Access::Authenticated, &draft)
            .await?;
        Ok(())
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<()> {
        self.send_empty(Verb::Delete, &conversation_path(id), Access::Authenticated)
            .await?;
        Ok(())
    }

    async fn send_to_assistant(&self, req: ChatbotRequest) -> Result<ChatbotReply> {
        let response = self
            .send_json(Verb::Post, "/chatbot", Access::Authenticated, &req)
            .await?;
        // A body that doesn't parse counts as an empty reply
        match response.json::<ChatbotReply>().await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                log::warn!("Malformed assistant reply: {}", e);
                Ok(ChatbotReply::default())
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ChatError::Serialization(e.to_string()))
}

/// Race a request against the configured timeout
async fn with_timeout<F: Future>(ms: u32, fut: F) -> Result<F::Output> {
    let timeout = TimeoutFuture::new(ms);
    futures::pin_mut!(fut);
    futures::pin_mut!(timeout);
    match future::select(fut, timeout).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(ChatError::Timeout(ms)),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn conversation_path(id: &ConversationId) -> String {
    format!("/api/conversations/{}", id)
}

/// Map a non-2xx response to an error. Only authenticated routes treat 401
/// as an expired session; `/login` answers 401 for bad credentials.
pub fn status_error(status: u16, body: &str, access: Access) -> ChatError {
    if status == 401 && access == Access::Authenticated {
        return ChatError::Unauthorized;
    }
    ChatError::Api {
        status,
        message: error_message_from_body(body),
    }
}
