pub mod http;

pub use http::{status_error, Access, HttpChatApi};
