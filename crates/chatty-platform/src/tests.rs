#[cfg(test)]
mod tests {
    use chatty_core::ports::TokenStore;
    use chatty_types::{conversation::ConversationId, ChatError};

    use crate::api::http::{bearer, conversation_path, status_error, Access};
    use crate::storage::watch::affects_key;
    use crate::storage::MemoryTokenStore;

    // ─── Status mapping ──────────────────────────────────────

    #[test]
    fn test_401_on_authenticated_route_is_unauthorized() {
        let err = status_error(401, r#"{"error":"token expired"}"#, Access::Authenticated);
        assert_eq!(err, ChatError::Unauthorized);
    }

    #[test]
    fn test_401_on_public_route_is_api_error() {
        let err = status_error(401, r#"{"error":"Invalid credentials"}"#, Access::Public);
        assert_eq!(
            err,
            ChatError::Api {
                status: 401,
                message: "Invalid credentials".to_string(),
            }
        );
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_body_falls_back_to_raw_text() {
        let err = status_error(500, "  upstream down\n", Access::Authenticated);
        assert_eq!(err.server_message(), Some("upstream down"));
    }

    #[test]
    fn test_empty_error_body_has_no_server_message() {
        let err = status_error(409, "", Access::Public);
        assert!(matches!(err, ChatError::Api { status: 409, .. }));
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_403_is_not_a_session_expiry() {
        let err = status_error(403, "forbidden", Access::Authenticated);
        assert!(!err.is_unauthorized());
    }

    // ─── Request shaping ─────────────────────────────────────

    #[test]
    fn test_bearer_header_value() {
        assert_eq!(bearer("abc.def"), "Bearer abc.def");
    }

    #[test]
    fn test_conversation_path() {
        let id = ConversationId::new("65f0c1");
        assert_eq!(conversation_path(&id), "/api/conversations/65f0c1");
    }

    // ─── Token stores ────────────────────────────────────────

    #[test]
    fn test_memory_token_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(!store.has_token());
        store.set("jwt").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("jwt"));
        assert!(store.has_token());
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_memory_token_store_clear_when_empty() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_storage_event_key_filter() {
        assert!(affects_key(Some("chatty_token"), "chatty_token"));
        assert!(!affects_key(Some("theme"), "chatty_token"));
        assert!(affects_key(None, "chatty_token"));
    }
}
