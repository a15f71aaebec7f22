//! HTTP client for the NoteHub notes service
//!
//! Four operations, each a single request/response round trip with a bearer
//! credential attached. No retries; every failure propagates unchanged.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::{Note, NoteDraft, PageResult, Tag};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Seam over the notes service operations
///
/// The production implementation is [`NotesApi`]; tests substitute fakes.
#[async_trait]
pub trait NotesService: Send + Sync {
    /// List notes matching a search text, page, and optional tag filter
    async fn list_notes(
        &self,
        search: &str,
        page: u32,
        tag: Option<Tag>,
    ) -> Result<PageResult, ApiError>;

    /// Fetch a single note by id
    async fn get_note(&self, id: &str) -> Result<Note, ApiError>;

    /// Create a note from a draft
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError>;

    /// Delete a note by id, returning the deleted note
    async fn delete_note(&self, id: &str) -> Result<Note, ApiError>;
}

/// Typed HTTP client for the notes service
#[derive(Debug, Clone)]
pub struct NotesApi {
    config: ClientConfig,
    http: reqwest::Client,
}

impl NotesApi {
    /// Create a client from immutable configuration
    #[inline]
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Create with a caller-provided `reqwest` client
    #[inline]
    #[must_use]
    pub fn with_http(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// The configuration this client was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Read the server's rejection message from a response body
    ///
    /// The service answers rejections with `{"message": "..."}`; anything
    /// else falls back to the raw body text.
    async fn rejection_message(response: reqwest::Response) -> String {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body)
    }
}

#[async_trait]
impl NotesService for NotesApi {
    async fn list_notes(
        &self,
        search: &str,
        page: u32,
        tag: Option<Tag>,
    ) -> Result<PageResult, ApiError> {
        debug!(search, page, ?tag, "listing notes");

        let mut params = vec![
            ("search".to_string(), search.to_string()),
            ("page".to_string(), page.to_string()),
            ("perPage".to_string(), self.config.per_page.to_string()),
        ];
        if let Some(tag) = tag {
            params.push(("tag".to_string(), tag.to_string()));
        }

        let response = self
            .http
            .get(self.url("/notes"))
            .bearer_auth(&self.config.token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::unexpected_status(status));
        }

        Ok(response.json().await?)
    }

    async fn get_note(&self, id: &str) -> Result<Note, ApiError> {
        debug!(id, "fetching note");

        let response = self
            .http
            .get(self.url(&format!("/notes/{id}")))
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { id: id.to_string() }),
            status => Err(ApiError::unexpected_status(status)),
        }
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        debug!(title = %draft.title, tag = %draft.tag, "creating note");

        let response = self
            .http
            .post(self.url("/notes"))
            .bearer_auth(&self.config.token)
            .json(draft)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::Validation {
                    message: Self::rejection_message(response).await,
                })
            }
            status => Err(ApiError::unexpected_status(status)),
        }
    }

    async fn delete_note(&self, id: &str) -> Result<Note, ApiError> {
        debug!(id, "deleting note");

        let response = self
            .http
            .delete(self.url(&format!("/notes/{id}")))
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { id: id.to_string() }),
            status => Err(ApiError::unexpected_status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_path() {
        let api = NotesApi::new(ClientConfig::new("t").with_base_url("http://localhost:9000/api"));
        assert_eq!(api.url("/notes"), "http://localhost:9000/api/notes");
        assert_eq!(api.url("/notes/42"), "http://localhost:9000/api/notes/42");
    }
}
