//! Session configuration, outcomes, and the transcript log.

use chatwidget_common::{ChatMessage, ConfigError, ConversationId, SessionId};
use chatwidget_config::{Position, WidgetConfig};

use crate::cookie::cookie_value;

/// Appended when the conversation bootstrap fails.
pub const CONNECT_ERROR_MESSAGE: &str =
    "Sorry, I cannot connect to the support system right now. Please try again later.";

/// Appended when a message exchange fails on an established conversation.
pub const PROCESSING_ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your message. Please try again.";

/// Everything a session needs at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub tenant_id: String,
    pub position: Position,
    pub theme_color: String,
    pub welcome_message: String,
    /// Read once from the host cookie; never changes afterwards.
    pub customer_identifier: Option<String>,
}

impl SessionConfig {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        let defaults = WidgetConfig::default();
        Self {
            tenant_id: tenant_id.into(),
            position: defaults.widget.position,
            theme_color: defaults.widget.theme_color,
            welcome_message: defaults.widget.welcome_message,
            customer_identifier: None,
        }
    }

    /// Build from a resolved widget config, reading the customer cookie.
    pub fn from_widget_config(config: &WidgetConfig) -> Self {
        Self {
            tenant_id: config.widget.tenant_id.clone(),
            position: config.widget.position,
            theme_color: config.widget.theme_color.clone(),
            welcome_message: config.widget.welcome_message.clone(),
            customer_identifier: cookie_value(
                &config.customer.cookies,
                &config.customer.cookie_name,
            ),
        }
    }

    pub fn with_customer_identifier(mut self, customer: impl Into<String>) -> Self {
        self.customer_identifier = Some(customer.into());
        self
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.tenant_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "widget.tenant_id is required".into(),
            ));
        }
        Ok(())
    }
}

/// Result of one `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing appended, nothing sent.
    Ignored,
    /// The backend replied; its content was appended.
    Replied(String),
    /// No conversation could be created; the connect error was appended.
    BootstrapFailed,
    /// The exchange failed; the processing error was appended.
    ExchangeFailed,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Mounted, no conversation yet. The next send bootstraps one.
    Mounted,
    /// A conversation exists and every send targets it.
    Active { conversation_id: ConversationId },
}

/// A conversation established by a successful bootstrap.
#[derive(Debug, Clone)]
pub(crate) struct Conversation {
    pub(crate) conversation_id: ConversationId,
    /// The session identifier sent with the create request that succeeded.
    pub(crate) session_id: SessionId,
}

/// Append-only transcript.
#[derive(Debug, Default)]
pub(crate) struct Transcript {
    entries: Vec<ChatMessage>,
}

impl Transcript {
    /// Append and return the new entry's index.
    pub(crate) fn push(&mut self, message: ChatMessage) -> usize {
        self.entries.push(message);
        self.entries.len() - 1
    }

    pub(crate) fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }
}
