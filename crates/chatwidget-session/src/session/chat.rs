//! Async exchange methods for ChatSession (send + bootstrap).

use chatwidget_common::{ChatMessage, ConversationId, Event, SessionId};
use tracing::{debug, info, warn};

use crate::{ApiError, NewConversation};

use super::manager::ChatSession;
use super::types::{Conversation, SendOutcome, CONNECT_ERROR_MESSAGE, PROCESSING_ERROR_MESSAGE};

impl ChatSession {
    /// Send one user message.
    ///
    /// The trimmed text is echoed into the transcript before any request
    /// is made. Exactly one assistant entry follows: the reply, or one of
    /// the two fixed error messages. Blank input is ignored. There is one
    /// attempt per call and no retry.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let content = text.trim();
        if content.is_empty() {
            debug!(widget_id = %self.widget_id, "ignoring blank message");
            return SendOutcome::Ignored;
        }

        self.append(ChatMessage::user(content)).await;

        let conversation_id = match self.bootstrap_conversation().await {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    widget_id = %self.widget_id,
                    error = %e,
                    transport = e.is_transport(),
                    "cannot reach chat backend"
                );
                self.append(ChatMessage::assistant(CONNECT_ERROR_MESSAGE)).await;
                return SendOutcome::BootstrapFailed;
            }
        };

        match self.api.send_message(&conversation_id, content).await {
            Ok(reply) => {
                debug!(
                    widget_id = %self.widget_id,
                    conversation_id = %conversation_id,
                    len = reply.content.len(),
                    "assistant replied"
                );
                self.append(ChatMessage::assistant(reply.content.clone())).await;
                SendOutcome::Replied(reply.content)
            }
            Err(e) => {
                warn!(
                    widget_id = %self.widget_id,
                    conversation_id = %conversation_id,
                    error = %e,
                    "message exchange failed"
                );
                self.events.publish(Event::ExchangeFailed {
                    reason: e.to_string(),
                });
                self.append(ChatMessage::assistant(PROCESSING_ERROR_MESSAGE)).await;
                SendOutcome::ExchangeFailed
            }
        }
    }

    /// Return the conversation id, creating the conversation if needed.
    ///
    /// Only one create request is in flight at a time; concurrent callers
    /// wait for it and share its result. A failed attempt stores nothing,
    /// and the next caller starts over with a fresh session identifier.
    pub async fn bootstrap_conversation(&self) -> Result<ConversationId, ApiError> {
        let conversation = self
            .conversation
            .get_or_try_init(|| self.create_conversation())
            .await?;
        Ok(conversation.conversation_id.clone())
    }

    async fn create_conversation(&self) -> Result<Conversation, ApiError> {
        let session_id = SessionId::new();
        let request = NewConversation {
            tenant_id: self.config.tenant_id.clone(),
            session_id: session_id.to_string(),
            customer_identifier: self.config.customer_identifier.clone(),
        };

        match self.api.create_conversation(&request).await {
            Ok(created) => {
                info!(
                    widget_id = %self.widget_id,
                    conversation_id = %created.id,
                    "conversation started"
                );
                self.events.publish(Event::ConversationStarted {
                    conversation_id: created.id.to_string(),
                });
                Ok(Conversation {
                    conversation_id: created.id,
                    session_id,
                })
            }
            Err(e) => {
                self.events.publish(Event::BootstrapFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
