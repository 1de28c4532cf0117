#[cfg(test)]
mod tests {
    use crate::panels::{chat, login, sidebar, signup};
    use crate::state::*;
    use chatty_core::store::{ChatAction, ChatStore};
    use chatty_types::conversation::{ConversationDto, ConversationHeader, ConversationId};
    use chatty_types::event::{ChatEvent, Route};
    use chatty_types::message::Message;

    fn loaded(id: &str, heading: &str, messages: Vec<Message>) -> ConversationDto {
        ConversationDto {
            id: ConversationId::new(id),
            heading: heading.to_string(),
            messages: Some(messages),
            updated_at: None,
        }
    }

    /// Run one headless frame and return what the closure produced
    fn frame<R>(mut f: impl FnMut(&mut egui::Ui) -> R) -> R {
        let ctx = egui::Context::default();
        let mut out = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                out = Some(f(ui));
            });
        });
        out.unwrap()
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new(Route::Chat);
        assert_eq!(state.route, Route::Chat);
        assert!(state.input_text.is_empty());
        assert!(state.form_error.is_none());
        assert!(state.notice.is_none());
        assert!(!state.auth_busy);
        assert!(state.pending_delete.is_none());
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_default_is_login() {
        assert_eq!(UiState::default().route, Route::Login);
    }

    #[test]
    fn test_submit_login_marks_busy() {
        let mut state = UiState::default();
        state.login.email = "a@b.c".to_string();
        state.login.password = "secret".to_string();

        let action = state.submit_login();
        assert_eq!(
            action,
            Some(UiAction::Login {
                email: "a@b.c".to_string(),
                password: "secret".to_string(),
            })
        );
        assert!(state.auth_busy);
        // A second click while in flight does nothing
        assert_eq!(state.submit_login(), None);
    }

    #[test]
    fn test_auth_failed_shows_message_and_unblocks() {
        let mut state = UiState::default();
        state.submit_login();
        state.process_events(vec![ChatEvent::AuthFailed {
            message: "Login failed. Please check your email and password.".to_string(),
        }]);
        assert!(!state.auth_busy);
        assert_eq!(
            state.form_error.as_deref(),
            Some("Login failed. Please check your email and password.")
        );
    }

    #[test]
    fn test_logged_in_navigates_and_clears_form() {
        let mut state = UiState::default();
        state.login.password = "secret".to_string();
        state.submit_login();
        state.process_events(vec![ChatEvent::LoggedIn, ChatEvent::Navigate(Route::Chat)]);

        assert_eq!(state.route, Route::Chat);
        assert!(!state.auth_busy);
        assert!(state.login.password.is_empty());
    }

    #[test]
    fn test_signup_success_lands_on_login_with_notice() {
        let mut state = UiState::new(Route::Signup);
        state.signup.name = "Ada".to_string();
        state.submit_signup();
        state.process_events(vec![ChatEvent::SignupSucceeded, ChatEvent::Navigate(Route::Login)]);

        assert_eq!(state.route, Route::Login);
        assert_eq!(state.notice.as_deref(), Some(SIGNUP_NOTICE));
        assert!(state.signup.name.is_empty());
        assert!(!state.auth_busy);
    }

    #[test]
    fn test_navigation_clears_form_error() {
        let mut state = UiState::default();
        state.form_error = Some("bad".to_string());
        state.process_events(vec![ChatEvent::Navigate(Route::Signup)]);
        assert!(state.form_error.is_none());
    }

    #[test]
    fn test_session_expired_resets_chat_inputs() {
        let mut state = UiState::new(Route::Chat);
        state.input_text = "half typed".to_string();
        state.pending_delete = Some(ConversationId::new("c1"));
        state.process_events(vec![ChatEvent::SessionExpired, ChatEvent::Navigate(Route::Login)]);

        assert_eq!(state.route, Route::Login);
        assert!(state.input_text.is_empty());
        assert!(state.pending_delete.is_none());
        assert_eq!(state.notice.as_deref(), Some(EXPIRED_NOTICE));
    }

    #[test]
    fn test_error_event_sets_status() {
        let mut state = UiState::new(Route::Chat);
        state.process_events(vec![ChatEvent::Error {
            message: "HTTP 500: boom".to_string(),
        }]);
        assert!(state.status_text.contains("boom"));
    }

    #[test]
    fn test_token_changed_updates_status() {
        let mut state = UiState::new(Route::Chat);
        state.process_events(vec![ChatEvent::TokenChanged { present: false }]);
        assert_eq!(state.status_text, "Signed out from another tab");
    }

    #[test]
    fn test_take_input_trims_and_rejects_blank() {
        let mut state = UiState::new(Route::Chat);
        state.input_text = "   \n\t".to_string();
        assert_eq!(state.take_input(), None);

        state.input_text = "  hello  ".to_string();
        assert_eq!(state.take_input().as_deref(), Some("hello"));
        assert!(state.input_text.is_empty());
    }

    // ─── Panel smoke tests ───────────────────────────────────

    #[test]
    fn test_login_panel_idle_frame_has_no_action() {
        let mut state = UiState::default();
        let action = frame(|ui| login::login_panel(ui, &mut state));
        assert_eq!(action, None);
    }

    #[test]
    fn test_signup_panel_idle_frame_has_no_action() {
        let mut state = UiState::new(Route::Signup);
        let action = frame(|ui| signup::signup_panel(ui, &mut state));
        assert_eq!(action, None);
    }

    #[test]
    fn test_sidebar_renders_headers_and_loaded() {
        let mut store = ChatStore::new();
        store.dispatch(ChatAction::HeadersLoaded(vec![ConversationHeader {
            id: ConversationId::new("c1"),
            heading: "First".to_string(),
            updated_at: None,
        }]));
        store.dispatch(ChatAction::Created(loaded("c2", "Second", vec![Message::user("hi")])));

        let mut state = UiState::new(Route::Chat);
        let action = frame(|ui| sidebar::sidebar_panel(ui, &mut state, &store));
        assert_eq!(action, None);
    }

    #[test]
    fn test_sidebar_row_preview_uses_latest_message() {
        let mut store = ChatStore::new();
        store.dispatch(ChatAction::HeadersLoaded(vec![ConversationHeader {
            id: ConversationId::new("c1"),
            heading: "First".to_string(),
            updated_at: None,
        }]));
        let long = "word ".repeat(40);
        store.dispatch(ChatAction::Created(loaded(
            "c2",
            "Second",
            vec![Message::user("hi"), Message::assistant(long.as_str())],
        )));

        let header_only = store.conversation(&ConversationId::new("c1")).unwrap();
        assert_eq!(sidebar::row_preview(header_only), None);

        let preview = sidebar::row_preview(store.conversation(&ConversationId::new("c2")).unwrap()).unwrap();
        assert!(preview.ends_with('…'));
        assert!(preview.chars().count() <= 81);

        store.dispatch(ChatAction::ReplyStarted(ConversationId::new("c2")));
        let awaiting = store.conversation(&ConversationId::new("c2")).unwrap();
        assert!(awaiting.last_message().unwrap().is_placeholder());
        assert_eq!(sidebar::row_preview(awaiting), None);
    }

    #[test]
    fn test_chat_panel_empty_state() {
        let store = ChatStore::new();
        let mut state = UiState::new(Route::Chat);
        let action = frame(|ui| chat::chat_panel(ui, &mut state, &store));
        assert_eq!(action, None);
    }

    #[test]
    fn test_chat_panel_keeps_input_while_awaiting_reply() {
        let mut store = ChatStore::new();
        store.dispatch(ChatAction::Created(loaded("c1", "Hi", vec![Message::user("Hi")])));
        store.dispatch(ChatAction::ReplyStarted(ConversationId::new("c1")));
        assert!(store.is_send_blocked());

        let mut state = UiState::new(Route::Chat);
        state.input_text = "next".to_string();
        let action = frame(|ui| chat::chat_panel(ui, &mut state, &store));
        assert_eq!(action, None);
        assert_eq!(state.input_text, "next");
    }
}
