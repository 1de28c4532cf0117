use serde::{Deserialize, Serialize};

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash
    pub api_base: String,
    /// `localStorage` key holding the bearer token
    pub token_key: String,
    /// Upper bound on a single HTTP round trip
    pub request_timeout_ms: u32,
    /// Shape of the `/chatbot` request body
    pub assistant_payload: AssistantPayload,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            request_timeout_ms: 30_000,
            assistant_payload: AssistantPayload::LatestMessage,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `CHATTY_API_BASE` / `CHATTY_TOKEN_KEY` set at
    /// build time. There is no process environment in the browser.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = option_env!("CHATTY_API_BASE") {
            config.api_base = base.to_string();
        }
        if let Some(key) = option_env!("CHATTY_TOKEN_KEY") {
            config.token_key = key.to_string();
        }
        config.normalized()
    }

    /// Strip trailing slashes from the base URL
    pub fn normalized(mut self) -> Self {
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

/// What the client sends to `POST /chatbot`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssistantPayload {
    /// `{"message": <latest user input>}`
    LatestMessage,
    /// `{"history": [{role, text}, ...]}` with the whole conversation
    FullHistory,
}

impl AssistantPayload {
    pub fn label(&self) -> &str {
        match self {
            AssistantPayload::LatestMessage => "Latest message",
            AssistantPayload::FullHistory => "Full history",
        }
    }
}

const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_TOKEN_KEY: &str = "chatty_token";
