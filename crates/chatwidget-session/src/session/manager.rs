//! ChatSession struct, mount, and local state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chatwidget_common::{ChatMessage, ConfigError, ConversationId, Event, EventBus, SessionId};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info};

use crate::ChatApi;

use super::types::{Conversation, SessionConfig, SessionState, Transcript};

/// One mounted widget's chat session.
///
/// Shared behind an `Arc` so sends can run as independent tasks. The
/// conversation id sits in a `OnceCell`: concurrent sends share one
/// in-flight bootstrap and the id can never be overwritten.
pub struct ChatSession {
    pub(super) config: SessionConfig,
    pub(super) api: Arc<dyn ChatApi>,
    pub(super) events: Arc<EventBus>,
    /// Stable for the life of the mount; correlates log lines.
    pub(super) widget_id: SessionId,
    pub(super) conversation: OnceCell<Conversation>,
    pub(super) transcript: RwLock<Transcript>,
    pub(super) open: AtomicBool,
}

impl ChatSession {
    /// Mount a session: visible, seeded with the welcome message, no
    /// network traffic. Subscribe to `events` first to see the seed.
    pub fn initialize(
        config: SessionConfig,
        api: Arc<dyn ChatApi>,
        events: Arc<EventBus>,
    ) -> Result<Self, ConfigError> {
        config.check()?;

        let widget_id = SessionId::new();
        let seed = ChatMessage::assistant(config.welcome_message.clone());
        let mut transcript = Transcript::default();
        let index = transcript.push(seed.clone());
        events.publish(Event::MessageAppended {
            index,
            message: seed,
        });

        info!(
            widget_id = %widget_id,
            tenant_id = %config.tenant_id,
            position = ?config.position,
            customer = config.customer_identifier.is_some(),
            "chat session mounted"
        );

        Ok(Self {
            config,
            api,
            events,
            widget_id,
            conversation: OnceCell::new(),
            transcript: RwLock::new(transcript),
            open: AtomicBool::new(true),
        })
    }

    /// Flip the open flag and return the new value. Purely local.
    pub fn toggle_visibility(&self) -> bool {
        let open = !self.open.fetch_xor(true, Ordering::AcqRel);
        debug!(widget_id = %self.widget_id, open, "widget visibility toggled");
        self.events.publish(Event::VisibilityChanged { open });
        open
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn state(&self) -> SessionState {
        match self.conversation.get() {
            Some(c) => SessionState::Active {
                conversation_id: c.conversation_id.clone(),
            },
            None => SessionState::Mounted,
        }
    }

    /// The backend conversation id, once a bootstrap has succeeded.
    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation.get().map(|c| &c.conversation_id)
    }

    /// The session identifier the successful bootstrap sent.
    pub fn conversation_session_id(&self) -> Option<&SessionId> {
        self.conversation.get().map(|c| &c.session_id)
    }

    pub fn widget_id(&self) -> &SessionId {
        &self.widget_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn customer_identifier(&self) -> Option<&str> {
        self.config.customer_identifier.as_deref()
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Snapshot of the transcript in display order.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.entries().to_vec()
    }

    pub async fn message_count(&self) -> usize {
        self.transcript.read().await.entries().len()
    }

    /// Append under the write lock so event order matches index order.
    pub(super) async fn append(&self, message: ChatMessage) {
        let mut transcript = self.transcript.write().await;
        let index = transcript.push(message.clone());
        self.events.publish(Event::MessageAppended { index, message });
    }
}
