//! UI-level state that drives rendering.
//! Form buffers and the current screen live here; conversations are read
//! from the store each frame. Updated by draining the EventBus.

use chatty_types::conversation::ConversationId;
use chatty_types::event::{ChatEvent, Route};

pub const SIGNUP_NOTICE: &str = "Account created. Please log in.";
pub const EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: String,
}

/// Intents raised by panels; the app turns them into service calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String, age: String },
    Navigate(Route),
    Logout,
    NewChat,
    Select(ConversationId),
    Delete(ConversationId),
    Send(String),
}

/// State visible to UI panels
pub struct UiState {
    /// Screen being shown
    pub route: Route,
    pub login: LoginForm,
    pub signup: SignupForm,
    /// Composer content
    pub input_text: String,
    /// Error shown under the login/signup form
    pub form_error: Option<String>,
    /// Informational line shown above the login form
    pub notice: Option<String>,
    /// A login or signup request is in flight
    pub auth_busy: bool,
    /// Conversation whose delete button awaits confirmation
    pub pending_delete: Option<ConversationId>,
    /// Status line text
    pub status_text: String,
}

impl UiState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            input_text: String::new(),
            form_error: None,
            notice: None,
            auth_busy: false,
            pending_delete: None,
            status_text: "Ready".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::LoggedIn => {
                    self.auth_busy = false;
                    self.login = LoginForm::default();
                    self.form_error = None;
                    self.notice = None;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::LoggedOut => {
                    self.reset_chat_inputs();
                    self.notice = None;
                    self.status_text = "Logged out".to_string();
                }
                ChatEvent::SessionExpired => {
                    self.reset_chat_inputs();
                    self.auth_busy = false;
                    self.notice = Some(EXPIRED_NOTICE.to_string());
                    self.status_text = "Session expired".to_string();
                }
                ChatEvent::Navigate(route) => {
                    if route != self.route {
                        log::debug!("Route {} -> {}", self.route.path(), route.path());
                        self.form_error = None;
                    }
                    self.route = route;
                    self.pending_delete = None;
                }
                ChatEvent::SignupSucceeded => {
                    self.auth_busy = false;
                    self.signup = SignupForm::default();
                    self.notice = Some(SIGNUP_NOTICE.to_string());
                }
                ChatEvent::AuthFailed { message } => {
                    self.auth_busy = false;
                    self.form_error = Some(message);
                }
                ChatEvent::StoreChanged => {}
                ChatEvent::TokenChanged { present } => {
                    self.status_text = if present {
                        "Signed in from another tab".to_string()
                    } else {
                        "Signed out from another tab".to_string()
                    };
                }
                ChatEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Take the login form as an intent, marking the request in flight
    pub fn submit_login(&mut self) -> Option<UiAction> {
        if self.auth_busy {
            return None;
        }
        self.auth_busy = true;
        self.form_error = None;
        self.notice = None;
        Some(UiAction::Login {
            email: self.login.email.clone(),
            password: self.login.password.clone(),
        })
    }

    pub fn submit_signup(&mut self) -> Option<UiAction> {
        if self.auth_busy {
            return None;
        }
        self.auth_busy = true;
        self.form_error = None;
        Some(UiAction::Signup {
            name: self.signup.name.clone(),
            email: self.signup.email.clone(),
            password: self.signup.password.clone(),
            age: self.signup.age.clone(),
        })
    }

    /// Take the composer content, or nothing when it is blank
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }

    fn reset_chat_inputs(&mut self) {
        self.input_text.clear();
        self.pending_delete = None;
        self.login.password.clear();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}
