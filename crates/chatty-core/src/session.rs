//! Auth session — owns the bearer token slot.
//!
//! Token presence is the only "logged in" signal. Login and signup go through
//! the public endpoints; a 401 from any authenticated endpoint ends up in
//! [`AuthSession::expire`].

use std::cell::RefCell;
use std::rc::Rc;

use chatty_types::{
    ChatError, Result,
    api::{LoginRequest, SignupRequest},
    event::{ChatEvent, Route},
};
use crate::event_bus::EventBus;
use crate::ports::{ChatApiPort, TokenStore};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your email and password.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";
pub const MIN_PASSWORD_LEN: usize = 6;

/// How the token slot moved since it was last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn,
    SignedOut,
    /// A different token replaced the one this tab knew
    Switched,
}

#[derive(Clone)]
pub struct AuthSession {
    tokens: Rc<dyn TokenStore>,
    event_bus: EventBus,
    /// Last observed token, for cross-tab change detection
    last_token: Rc<RefCell<Option<String>>>,
}

impl AuthSession {
    pub fn new(tokens: Rc<dyn TokenStore>, event_bus: EventBus) -> Self {
        let last_token = Rc::new(RefCell::new(read_token(tokens.as_ref())));
        Self {
            tokens,
            event_bus,
            last_token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token()
    }

    /// Route to show for a requested screen: protected screens need a token,
    /// login/signup are skipped once one exists.
    pub fn resolve_route(&self, requested: Route) -> Route {
        match (requested.is_protected(), self.is_authenticated()) {
            (true, false) => Route::Login,
            (false, true) => Route::Chat,
            _ => requested,
        }
    }

    pub async fn login(&self, api: &dyn ChatApiPort, email: &str, password: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(self.auth_failed(ChatError::Validation(
                "Email and password are required.".to_string(),
            )));
        }

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token = match api.login(req).await {
            Ok(resp) if !resp.token.is_empty() => resp.token,
            Ok(_) => {
                log::error!("Login response carried an empty token");
                return Err(self.login_failed(ChatError::Validation("empty token".to_string())));
            }
            Err(e) => {
                log::error!("Login error: {}", e);
                return Err(self.login_failed(e));
            }
        };

        self.tokens.set(&token).map_err(|e| self.login_failed(e))?;
        self.last_token.replace(Some(token));
        log::info!("Logged in");
        self.event_bus.emit(ChatEvent::LoggedIn);
        self.event_bus.emit(ChatEvent::Navigate(Route::Chat));
        Ok(())
    }

    pub async fn signup(
        &self,
        api: &dyn ChatApiPort,
        name: &str,
        email: &str,
        password: &str,
        age: &str,
    ) -> Result<()> {
        let req = validate_signup(name, email, password, age).map_err(|e| self.auth_failed(e))?;

        if let Err(e) = api.signup(req).await {
            log::error!("Signup error: {}", e);
            let message = e
                .server_message()
                .unwrap_or(SIGNUP_FAILED_MESSAGE)
                .to_string();
            self.event_bus.emit(ChatEvent::AuthFailed { message });
            return Err(e);
        }

        log::info!("Account created");
        self.event_bus.emit(ChatEvent::SignupSucceeded);
        self.event_bus.emit(ChatEvent::Navigate(Route::Login));
        Ok(())
    }

    pub fn logout(&self) {
        self.erase_token();
        log::info!("Logged out");
        self.event_bus.emit(ChatEvent::LoggedOut);
        self.event_bus.emit(ChatEvent::Navigate(Route::Login));
    }

    /// An authenticated call was rejected with 401.
    pub fn expire(&self) {
        self.erase_token();
        log::warn!("Session expired, redirecting to {}", Route::Login.path());
        self.event_bus.emit(ChatEvent::SessionExpired);
        self.event_bus.emit(ChatEvent::Navigate(Route::Login));
    }

    /// Re-read the token slot after a storage change from another tab.
    /// Returns `None` when the token is the one last observed.
    pub fn sync_from_storage(&self) -> Option<SessionChange> {
        let current = read_token(self.tokens.as_ref());
        let previous = self.last_token.replace(current.clone());
        if previous == current {
            return None;
        }
        let change = match (previous.is_some(), current.is_some()) {
            (false, _) => SessionChange::SignedIn,
            (true, false) => SessionChange::SignedOut,
            (true, true) => SessionChange::Switched,
        };
        log::info!("Token changed in another tab: {:?}", change);
        self.event_bus.emit(ChatEvent::TokenChanged {
            present: current.is_some(),
        });
        Some(change)
    }

    fn erase_token(&self) {
        if let Err(e) = self.tokens.clear() {
            log::warn!("Failed to clear token from {}: {}", self.tokens.backend_name(), e);
        }
        self.last_token.replace(None);
    }

    fn login_failed(&self, e: ChatError) -> ChatError {
        self.event_bus.emit(ChatEvent::AuthFailed {
            message: LOGIN_FAILED_MESSAGE.to_string(),
        });
        e
    }

    fn auth_failed(&self, e: ChatError) -> ChatError {
        self.event_bus.emit(ChatEvent::AuthFailed {
            message: e.to_string(),
        });
        e
    }
}

fn read_token(tokens: &dyn TokenStore) -> Option<String> {
    match tokens.get() {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Token unreadable from {}: {}", tokens.backend_name(), e);
            None
        }
    }
}

/// Check the signup form before anything goes over the wire.
pub fn validate_signup(name: &str, email: &str, password: &str, age: &str) -> Result<SignupRequest> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() || age.trim().is_empty() {
        return Err(ChatError::Validation("All fields are required.".to_string()));
    }
    if !email.contains('@') {
        return Err(ChatError::Validation("Please enter a valid email address.".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ChatError::Validation(format!(
            "Password must be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    let age: u32 = age
        .trim()
        .parse()
        .map_err(|_| ChatError::Validation("Age must be a whole number.".to_string()))?;

    Ok(SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        age,
    })
}
