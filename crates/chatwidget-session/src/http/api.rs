//! ChatApi trait implementation for HttpChatApi.

use async_trait::async_trait;
use chatwidget_common::ConversationId;
use serde_json::json;
use tracing::debug;

use crate::{ApiError, AssistantReply, ChatApi, CreatedConversation, NewConversation};

use super::client::{read_json, transport_error, HttpChatApi};

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_conversation(
        &self,
        request: &NewConversation,
    ) -> Result<CreatedConversation, ApiError> {
        let url = self.endpoint("/chat/conversation");
        debug!(%url, tenant_id = %request.tenant_id, "creating conversation");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn send_message(
        &self,
        conversation_id: &ConversationId,
        content: &str,
    ) -> Result<AssistantReply, ApiError> {
        let url = self.conversation_endpoint("/chat/message", conversation_id);
        debug!(%url, len = content.len(), "sending message");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}
