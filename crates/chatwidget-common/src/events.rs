use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::ChatMessage;

/// Observable session transitions.
///
/// The session publishes these instead of touching presentation state; a
/// rendering layer subscribes and mirrors them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A transcript entry was appended at `index`.
    MessageAppended { index: usize, message: ChatMessage },
    ConversationStarted { conversation_id: String },
    BootstrapFailed { reason: String },
    ExchangeFailed { reason: String },
    VisibilityChanged { open: bool },
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publish to all current subscribers. Returns how many received it.
    pub fn publish(&self, event: Event) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::trace!("event dropped, no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
