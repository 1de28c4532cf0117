//! Client core: conversation store, auth session, chat service and the
//! port traits the browser adapters implement.

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod session;
pub mod service;
