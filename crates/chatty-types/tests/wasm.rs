//! WASM-target tests for chatty-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chatty_types::message::*;
use chatty_types::conversation::*;
use chatty_types::api::*;
use chatty_types::event::*;
use chatty_types::config::*;
use chatty_types::error::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_wire_names() {
    let json = serde_json::to_string(&Message::user("hi")).unwrap();
    assert_eq!(json, r#"{"text":"hi","isUser":true}"#);
}

#[wasm_bindgen_test]
fn message_placeholder() {
    let msg = Message::placeholder();
    assert!(msg.is_placeholder());
    assert_eq!(msg.role(), Role::Assistant);
}

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn header_is_not_loaded() {
    let json = r#"{"id":"65a1","heading":"Hi","updatedAt":"2024-05-01T10:00:00Z"}"#;
    let conv: Conversation = serde_json::from_str::<ConversationHeader>(json).unwrap().into();
    assert!(!conv.is_loaded());
    assert!(conv.draft().is_none());
}

#[wasm_bindgen_test]
fn dto_is_loaded() {
    let json = r#"{"id":"a","heading":"h","messages":[{"text":"q","isUser":true}]}"#;
    let conv: Conversation = serde_json::from_str::<ConversationDto>(json).unwrap().into();
    assert!(conv.is_loaded());
    assert_eq!(conv.messages().len(), 1);
}

// ─── API / Config / Error Tests ──────────────────────────

#[wasm_bindgen_test]
fn chatbot_reply_blank_is_none() {
    let reply: ChatbotReply = serde_json::from_str(r#"{"reply":""}"#).unwrap();
    assert!(reply.text().is_none());
}

#[wasm_bindgen_test]
fn route_login_path() {
    assert_eq!(Route::Login.path(), "/login");
}

#[wasm_bindgen_test]
fn default_config_points_at_localhost() {
    let config = ClientConfig::default();
    assert_eq!(config.url("/api/conversations"), "http://localhost:8080/api/conversations");
}

#[wasm_bindgen_test]
fn error_display() {
    assert_eq!(ChatError::Timeout(10).to_string(), "Timeout after 10ms");
}
