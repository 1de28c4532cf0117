//! Main egui application — routes between screens and drives the chat service.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, SidePanel, TopBottomPanel, RichText};

use chatty_core::event_bus::EventBus;
use chatty_core::ports::ChatApiPort;
use chatty_core::service::{ChatService, SendOutcome};
use chatty_core::session::AuthSession;
use chatty_core::store::{ChatStore, LoadStatus, SharedStore};
use chatty_platform::api::HttpChatApi;
use chatty_platform::storage::{auto_detect_token_store, watch_token_changes, TokenWatcher};
use chatty_types::config::ClientConfig;
use chatty_types::conversation::ConversationId;
use chatty_types::event::{ChatEvent, Route};
use chatty_ui::panels::{chat, login, sidebar, signup};
use chatty_ui::state::{UiAction, UiState};
use chatty_ui::theme;

/// The main application state
pub struct ChattyApp {
    ui_state: UiState,
    config: ClientConfig,
    event_bus: EventBus,
    store: SharedStore,
    api: Rc<dyn ChatApiPort>,
    service: ChatService,
    /// Header list already requested for this session
    headers_requested: bool,
    /// Conversations whose messages were already requested
    message_fetches: Rc<RefCell<HashSet<ConversationId>>>,
    /// Set by the storage listener, consumed on the next frame
    token_dirty: Rc<Cell<bool>>,
    _token_watcher: Option<TokenWatcher>,
    first_frame: bool,
}

impl ChattyApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::from_build_env();
        log::info!(
            "Backend {} (assistant payload: {})",
            config.api_base,
            config.assistant_payload.label()
        );

        let event_bus = EventBus::new();
        let tokens = auto_detect_token_store(&config.token_key);
        let api: Rc<dyn ChatApiPort> = Rc::new(HttpChatApi::new(config.clone(), tokens.clone()));
        let session = AuthSession::new(tokens, event_bus.clone());
        let store = ChatStore::shared();
        let service = ChatService::new(
            store.clone(),
            api.clone(),
            session.clone(),
            event_bus.clone(),
            config.assistant_payload,
        );

        let token_dirty = Rc::new(Cell::new(false));
        let token_watcher = {
            let dirty = token_dirty.clone();
            let ctx = cc.egui_ctx.clone();
            match watch_token_changes(&config.token_key, move || {
                dirty.set(true);
                ctx.request_repaint();
            }) {
                Ok(w) => Some(w),
                Err(e) => {
                    log::warn!("Cross-tab session sync disabled: {}", e);
                    None
                }
            }
        };

        let route = session.resolve_route(Route::Chat);

        Self {
            ui_state: UiState::new(route),
            config,
            event_bus,
            store,
            api,
            service,
            headers_requested: false,
            message_fetches: Rc::new(RefCell::new(HashSet::new())),
            token_dirty,
            _token_watcher: token_watcher,
            first_frame: true,
        }
    }

    /// Run a service call off the frame loop and repaint once it settles
    fn spawn<F>(&self, ctx: &egui::Context, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            fut.await;
            ctx.request_repaint();
        });
    }

    fn handle_action(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::Login { email, password } => {
                let session = self.service.session().clone();
                let api = self.api.clone();
                self.spawn(ctx, async move {
                    let _ = session.login(api.as_ref(), &email, &password).await;
                });
            }
            UiAction::Signup { name, email, password, age } => {
                let session = self.service.session().clone();
                let api = self.api.clone();
                self.spawn(ctx, async move {
                    let _ = session.signup(api.as_ref(), &name, &email, &password, &age).await;
                });
            }
            UiAction::Navigate(route) => {
                self.event_bus.emit(ChatEvent::Navigate(route));
            }
            UiAction::Logout => {
                self.service.logout();
            }
            UiAction::NewChat => {
                self.service.new_chat();
            }
            UiAction::Select(id) => {
                self.message_fetches.borrow_mut().insert(id.clone());
                let service = self.service.clone();
                self.spawn(ctx, async move {
                    if let Err(e) = service.select_conversation(&id).await {
                        log::debug!("Select {} failed: {}", id, e);
                    }
                });
            }
            UiAction::Delete(id) => {
                let service = self.service.clone();
                self.spawn(ctx, async move {
                    let _ = service.delete_conversation(&id).await;
                });
            }
            UiAction::Send(text) => {
                let service = self.service.clone();
                self.spawn(ctx, async move {
                    match service.send_and_await_reply(&text).await {
                        Ok(SendOutcome::Ignored) => log::debug!("Send ignored"),
                        Ok(outcome) => log::debug!("Send finished: {:?}", outcome),
                        Err(e) => log::error!("Send failed: {}", e),
                    }
                });
            }
        }
    }

    /// Kick off the loads the chat screen needs
    fn load_chat_data(&mut self, ctx: &egui::Context) {
        let (status, needs_messages) = {
            let store = self.store.borrow();
            (store.status(), store.active_needs_messages().cloned())
        };

        if status == LoadStatus::Idle && !self.headers_requested {
            self.headers_requested = true;
            let service = self.service.clone();
            let fetches = self.message_fetches.clone();
            self.spawn(ctx, async move {
                if service.fetch_conversation_headers().await.is_ok() {
                    // Bodies may have been replaced by fresher headers
                    fetches.borrow_mut().clear();
                }
            });
            return;
        }

        if let Some(id) = needs_messages {
            if self.message_fetches.borrow_mut().insert(id.clone()) {
                let service = self.service.clone();
                self.spawn(ctx, async move {
                    let _ = service.fetch_conversation_messages(&id).await;
                });
            }
        }
    }

    /// Session lifecycle events reset the per-session load bookkeeping
    fn observe(&mut self, events: &[ChatEvent]) {
        for event in events {
            match event {
                ChatEvent::LoggedIn
                | ChatEvent::LoggedOut
                | ChatEvent::SessionExpired
                | ChatEvent::TokenChanged { .. } => {
                    self.headers_requested = false;
                    self.message_fetches.borrow_mut().clear();
                }
                _ => {}
            }
        }
    }
}

impl eframe::App for ChattyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        if self.token_dirty.replace(false) {
            self.service.sync_session();
        }

        // Route guard: protected screens need a token, auth screens don't
        let guarded = self.service.session().resolve_route(self.ui_state.route);
        if guarded != self.ui_state.route {
            self.event_bus.emit(ChatEvent::Navigate(guarded));
        }

        // Drain events from the session and service
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.observe(&events);
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.route == Route::Chat {
            self.load_chat_data(ctx);
        }

        let mut action = None;

        match self.ui_state.route {
            Route::Login => {
                CentralPanel::default().show(ctx, |ui| {
                    action = login::login_panel(ui, &mut self.ui_state);
                });
            }
            Route::Signup => {
                CentralPanel::default().show(ctx, |ui| {
                    action = signup::signup_panel(ui, &mut self.ui_state);
                });
            }
            Route::Chat => {
                let store = self.store.borrow();

                TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&self.config.api_base)
                                .color(theme::TEXT_SECONDARY)
                                .small(),
                        );
                        ui.separator();
                        ui.label(
                            RichText::new(format!("{} conversations", store.conversations().len()))
                                .color(theme::TEXT_SECONDARY)
                                .small(),
                        );
                    });
                });

                SidePanel::left("sidebar")
                    .resizable(true)
                    .default_width(theme::SIDEBAR_WIDTH)
                    .show(ctx, |ui| {
                        if let Some(a) = sidebar::sidebar_panel(ui, &mut self.ui_state, &store) {
                            action = Some(a);
                        }
                    });

                CentralPanel::default().show(ctx, |ui| {
                    if let Some(a) = chat::chat_panel(ui, &mut self.ui_state, &store) {
                        action = Some(a);
                    }
                });

                if store.is_send_blocked() || store.status() == LoadStatus::Loading {
                    ctx.request_repaint();
                }
            }
        }

        // Store borrow is released before any action touches the service
        if let Some(action) = action {
            self.handle_action(action, ctx);
        }
    }
}
