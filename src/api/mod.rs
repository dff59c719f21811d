//! HTTP client for the chat backend.
//!
//! Thin wrappers over the five endpoints under `/api/chat`. Every call turns a
//! non-2xx response into an [`ApiError`] carrying a message fit for display.

mod error;
mod types;

pub use error::ApiError;
pub use types::{
    AskRequest, AskResponse, EditRegenResponse, HistoryItem, Role, UpdateMessageRequest,
};

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Handle to the chat API. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ChatApi {
    client: Client,
    base: String,
}

impl ChatApi {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Send a message and wait for the assistant's reply.
    pub async fn ask(&self, message: &str, system: Option<&str>) -> Result<AskResponse, ApiError> {
        debug!(len = message.len(), "POST /api/chat/ask");
        let resp = self
            .client
            .post(self.url("/api/chat/ask"))
            .json(&AskRequest { message, system })
            .send()
            .await?;
        decode(ensure_success(resp, true).await?).await
    }

    /// Most recent `limit` history items, oldest first.
    pub async fn fetch_history(&self, limit: u32) -> Result<Vec<HistoryItem>, ApiError> {
        debug!(limit, "GET /api/chat/history");
        let resp = self
            .client
            .get(self.url("/api/chat/history"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        decode(ensure_success(resp, false).await?).await
    }

    /// Replace the text of a user message without touching the replies.
    pub async fn update_message(&self, id: i64, text: &str) -> Result<HistoryItem, ApiError> {
        debug!(id, "PUT /api/chat/message/{{id}}");
        let resp = self
            .client
            .put(self.url(&format!("/api/chat/message/{}", id)))
            .json(&UpdateMessageRequest { text })
            .send()
            .await?;
        decode(ensure_success(resp, true).await?).await
    }

    /// Delete the whole conversation.
    pub async fn delete_history(&self) -> Result<(), ApiError> {
        debug!("DELETE /api/chat/history");
        let resp = self
            .client
            .delete(self.url("/api/chat/history"))
            .send()
            .await?;
        ensure_success(resp, true).await?;
        Ok(())
    }

    /// Edit a user message, discard everything after it and regenerate the reply.
    pub async fn edit_and_regenerate(
        &self,
        id: i64,
        text: &str,
    ) -> Result<EditRegenResponse, ApiError> {
        debug!(id, "POST /api/chat/message/{{id}}/edit_regen");
        let resp = self
            .client
            .post(self.url(&format!("/api/chat/message/{}/edit_regen", id)))
            .json(&UpdateMessageRequest { text })
            .send()
            .await?;
        decode(ensure_success(resp, true).await?).await
    }
}

async fn ensure_success(resp: Response, read_detail: bool) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    // An unreadable body only loses the detail text, not the error itself.
    let body = if read_detail {
        resp.text().await.unwrap_or_default()
    } else {
        String::new()
    };
    Err(ApiError::from_status(status.as_u16(), &body, read_detail))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ApiError::Decode(e)
        } else {
            ApiError::Transport(e)
        }
    })
}
