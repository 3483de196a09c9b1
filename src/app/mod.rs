//! Application layer: the session, UI state, and event handling.

pub mod event;
pub mod handler;
pub mod session;
pub mod state;
