//! HTTP client struct, URL building, and response checking.

use chatwidget_common::ConversationId;
use chatwidget_config::RemoteWidgetSettings;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ApiError, ConversationRecord};

use super::config::HttpApiConfig;

/// Longest error body kept in [`ApiError::Http`].
const MAX_ERROR_BODY: usize = 200;

/// Chat backend client.
pub struct HttpChatApi {
    pub(crate) config: HttpApiConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpChatApi {
    pub fn new(config: HttpApiConfig) -> Result<Self, ApiError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpApiConfig {
        &self.config
    }

    /// Join an absolute API path (`/chat/...`) onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim().trim_end_matches('/'), path)
    }

    /// URL for a conversation-scoped path; the id is percent-encoded.
    pub(crate) fn conversation_endpoint(&self, prefix: &str, id: &ConversationId) -> String {
        self.endpoint(&format!("{prefix}/{}", urlencoding::encode(id.as_str())))
    }

    /// Fetch a conversation with its stored messages.
    ///
    /// `GET /chat/conversation/{conversation_id}`
    pub async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<ConversationRecord, ApiError> {
        let url = self.conversation_endpoint("/chat/conversation", conversation_id);
        debug!(%url, "fetching conversation");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    /// Resolve a tenant's widget settings from its API key.
    ///
    /// `GET /widget/config?api_key=...`
    pub async fn fetch_widget_settings(
        &self,
        api_key: &str,
    ) -> Result<RemoteWidgetSettings, ApiError> {
        let url = self.endpoint("/widget/config");
        debug!(%url, "fetching widget settings");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}

/// Map a reqwest send/read failure onto the error taxonomy.
pub(crate) fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_builder() {
        ApiError::InvalidUrl(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Reject non-2xx statuses, then decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body = text.chars().take(MAX_ERROR_BODY).collect::<String>();
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}
