#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::conversation::*;
    use crate::api::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert!(msg.is_user);
        assert!(!msg.loading);
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.text, "Hello");
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("I can help");
        assert!(!msg.is_user);
        assert_eq!(msg.role(), Role::Assistant);
        assert!(!msg.is_placeholder());
    }

    #[test]
    fn test_message_placeholder() {
        let msg = Message::placeholder();
        assert!(msg.is_placeholder());
        assert!(!msg.is_user);
        assert!(msg.text.is_empty());
    }

    #[test]
    fn test_message_wire_names() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi","isUser":true}"#);

        let json = serde_json::to_string(&Message::placeholder()).unwrap();
        assert!(json.contains(r#""loading":true"#));
    }

    #[test]
    fn test_message_deserialize_without_loading() {
        let msg: Message = serde_json::from_str(r#"{"text":"yo","isUser":false}"#).unwrap();
        assert_eq!(msg, Message::assistant("yo"));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
    }

    #[test]
    fn test_history_entry_from_message() {
        let entry = HistoryEntry::from(&Message::assistant("sure"));
        assert_eq!(entry.role, Role::Assistant);
        assert_eq!(entry.text, "sure");
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_header_deserializes_backend_shape() {
        let json = r#"{"id":"65a1","userId":"u1","heading":"Hi","messages":null,"updatedAt":"2024-05-01T10:00:00Z"}"#;
        let header: ConversationHeader = serde_json::from_str(json).unwrap();
        assert_eq!(header.id, ConversationId::new("65a1"));
        assert_eq!(header.heading, "Hi");
        assert!(header.updated_at.is_some());

        let conv: Conversation = header.into();
        assert!(!conv.is_loaded());
        assert!(conv.messages().is_empty());
        assert!(conv.draft().is_none());
    }

    #[test]
    fn test_dto_null_messages_becomes_empty_loaded() {
        let json = r#"{"id":"a","heading":"h","messages":null}"#;
        let dto: ConversationDto = serde_json::from_str(json).unwrap();
        let conv: Conversation = dto.into();
        assert_eq!(conv.body, ConversationBody::Loaded(vec![]));
    }

    #[test]
    fn test_dto_with_messages() {
        let json = r#"{"id":"a","heading":"h","messages":[{"text":"q","isUser":true},{"text":"r","isUser":false}]}"#;
        let conv: Conversation = serde_json::from_str::<ConversationDto>(json).unwrap().into();
        assert!(conv.is_loaded());
        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.last_message().unwrap().text, "r");
    }

    #[test]
    fn test_draft_skips_placeholder() {
        let conv = Conversation {
            id: "a".into(),
            heading: "h".to_string(),
            updated_at: None,
            body: ConversationBody::Loaded(vec![Message::user("q"), Message::placeholder()]),
        };
        let draft = conv.draft().unwrap();
        assert_eq!(draft.heading, "h");
        assert_eq!(draft.messages, vec![Message::user("q")]);
    }

    #[test]
    fn test_conversation_id_display() {
        let id = ConversationId::new("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    }

    // ─── API Body Tests ──────────────────────────────────────

    #[test]
    fn test_chatbot_request_message_shape() {
        let req = ChatbotRequest::Message { message: "hello".to_string() };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_chatbot_request_history_shape() {
        let req = ChatbotRequest::from_history(&[
            Message::user("q"),
            Message::assistant("a"),
            Message::placeholder(),
        ]);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"history":[{"role":"user","text":"q"},{"role":"assistant","text":"a"}]}"#
        );
    }

    #[test]
    fn test_chatbot_reply_text() {
        let reply: ChatbotReply = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(reply.text(), Some("hi"));

        let blank: ChatbotReply = serde_json::from_str(r#"{"reply":"  "}"#).unwrap();
        assert_eq!(blank.text(), None);

        let missing: ChatbotReply = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.text(), None);
    }

    #[test]
    fn test_signup_request_serialization() {
        let req = SignupRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            age: 30,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""age":30"#));
    }

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message_from_body(r#"{"error":"user already exists"}"#),
            "user already exists"
        );
        assert_eq!(error_message_from_body("plain failure\n"), "plain failure");
        assert_eq!(error_message_from_body(""), "");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Signup.path(), "/signup");
        assert_eq!(Route::Chat.path(), "/");
        assert!(Route::Chat.is_protected());
        assert!(!Route::Login.is_protected());
    }

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::Navigate(Route::Login);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Navigate"));
        assert!(json.contains("Login"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.token_key, "chatty_token");
        assert_eq!(config.assistant_payload, AssistantPayload::LatestMessage);
        assert!(config.request_timeout_ms > 0);
    }

    #[test]
    fn test_config_url_and_normalize() {
        let config = ClientConfig {
            api_base: "https://chat.example.com//".to_string(),
            ..ClientConfig::default()
        }
        .normalized();
        assert_eq!(config.url("/login"), "https://chat.example.com/login");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.api_base, config.api_base);
        assert_eq!(deserialized.assistant_payload, AssistantPayload::LatestMessage);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(ChatError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(ChatError::Timeout(5000).to_string(), "Timeout after 5000ms");
        let err = ChatError::Api { status: 500, message: "boom".to_string() };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_error_helpers() {
        assert!(ChatError::Unauthorized.is_unauthorized());
        assert!(!ChatError::Network("x".to_string()).is_unauthorized());

        let err = ChatError::Api { status: 400, message: "user already exists".to_string() };
        assert_eq!(err.server_message(), Some("user already exists"));
        let err = ChatError::Api { status: 400, message: String::new() };
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
