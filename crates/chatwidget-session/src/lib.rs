//! Chat session engine for the embeddable widget.
//!
//! Provides:
//! - The [`ChatApi`] seam between the session and the backend
//! - A reqwest-backed [`HttpChatApi`] for the hosted chat service
//! - [`ChatSession`]: lazy conversation bootstrap, optimistic local echo,
//!   and the append-only transcript
//! - Host cookie lookup for the customer identifier

pub mod cookie;
pub mod http;
pub mod session;

use async_trait::async_trait;
use chatwidget_common::ConversationId;
use serde::{Deserialize, Serialize};

pub use http::{HttpApiConfig, HttpChatApi};
pub use session::{
    ChatSession, SendOutcome, SessionConfig, SessionState, CONNECT_ERROR_MESSAGE,
    PROCESSING_ERROR_MESSAGE,
};

/// The two backend calls a session depends on.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /chat/conversation`
    async fn create_conversation(
        &self,
        request: &NewConversation,
    ) -> Result<CreatedConversation, ApiError>;

    /// `POST /chat/message/{conversation_id}`
    async fn send_message(
        &self,
        conversation_id: &ConversationId,
        content: &str,
    ) -> Result<AssistantReply, ApiError>;
}

/// Conversation-create request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConversation {
    pub tenant_id: String,
    pub session_id: String,
    /// Sent as `null` when the host has no customer cookie.
    pub customer_identifier: Option<String>,
}

/// The part of the conversation-create response the widget uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedConversation {
    pub id: ConversationId,
}

/// The part of the message-send response the widget uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssistantReply {
    pub content: String,
}

/// A conversation as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub tenant_id: String,
    pub session_id: String,
    #[serde(default)]
    pub customer_identifier: Option<String>,
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

/// A message as stored by the backend. The backend may also hold
/// `system` entries, so the role stays a plain string here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredMessage {
    pub content: String,
    pub role: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Transport failures and timeouts; everything a retry could fix.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout)
    }
}
