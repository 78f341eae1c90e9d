//! Widget chat session.
//!
//! A `ChatSession` owns the transcript, the write-once conversation id,
//! and the open/closed flag for one mounted widget. It drives the
//! bootstrap-then-exchange protocol against a [`ChatApi`](crate::ChatApi)
//! and publishes every state change on an `EventBus`.

mod chat;
mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::ChatSession;
pub use types::{
    SendOutcome, SessionConfig, SessionState, CONNECT_ERROR_MESSAGE, PROCESSING_ERROR_MESSAGE,
};
