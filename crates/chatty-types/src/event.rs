use serde::{Deserialize, Serialize};

/// Screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Login,
    Signup,
    Chat,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Chat => "/",
        }
    }

    /// Whether the screen requires a token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Chat)
    }
}

/// Events emitted by the session and chat service.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A token was obtained and stored
    LoggedIn,

    /// The user logged out
    LoggedOut,

    /// An authenticated call came back 401; the token has been erased
    SessionExpired,

    /// Switch to another screen
    Navigate(Route),

    SignupSucceeded,

    /// Login or signup failed; `message` is shown under the form
    AuthFailed { message: String },

    /// The conversation store was mutated
    StoreChanged,

    /// The token slot was changed from another tab
    TokenChanged { present: bool },

    /// A non-fatal error worth showing in the status line
    Error { message: String },
}
