pub mod chat;
pub mod login;
pub mod sidebar;
pub mod signup;
