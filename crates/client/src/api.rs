//! Typed HTTP client for the `/api/v1` endpoints.
//!
//! Success bodies are unwrapped from the `{ "data": ... }` envelope; error
//! bodies (`{ "error", "code" }`) become [`ClientError::Api`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use setlist_core::filter::TrackFilter;
use setlist_core::models::set::{AddSetTrack, CreateSet, ReorderSetTracks, SetWithTracks, UpdateSet};
use setlist_core::models::track::{CreateTrack, Track, UpdateTrack};
use setlist_core::music_key::KeyOption;
use setlist_core::types::DbId;

use crate::error::ClientError;

/// `{ "data": T }` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: DbId,
    pub message: String,
}

/// Option returned by `GET /meta/keys`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyChoice {
    pub value: String,
    pub label: String,
}

impl From<KeyOption> for KeyChoice {
    fn from(option: KeyOption) -> Self {
        Self {
            value: option.value.to_string(),
            label: option.label,
        }
    }
}

/// HTTP client for a setlist API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g.
    /// `http://localhost:5000`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Tracks
    // -----------------------------------------------------------------------

    /// `GET /tracks` with the supplied criteria as query parameters.
    pub async fn list_tracks(&self, filter: &TrackFilter) -> Result<Vec<Track>, ClientError> {
        let response = self
            .client
            .get(self.url("/tracks"))
            .query(filter)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn get_track(&self, id: DbId) -> Result<Track, ClientError> {
        let response = self.client.get(self.url(&format!("/tracks/{id}"))).send().await?;
        Self::parse_data(response).await
    }

    pub async fn create_track(&self, input: &CreateTrack) -> Result<Track, ClientError> {
        let response = self.client.post(self.url("/tracks")).json(input).send().await?;
        Self::parse_data(response).await
    }

    pub async fn update_track(&self, id: DbId, input: &UpdateTrack) -> Result<Track, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/tracks/{id}")))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Delete a track. The server also removes it from every set.
    pub async fn delete_track(&self, id: DbId) -> Result<Deleted, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/tracks/{id}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // -----------------------------------------------------------------------
    // Sets
    // -----------------------------------------------------------------------

    /// `GET /sets`. Track references come back unresolved.
    pub async fn list_sets(&self) -> Result<Vec<SetWithTracks>, ClientError> {
        let response = self.client.get(self.url("/sets")).send().await?;
        Self::parse_data(response).await
    }

    /// `GET /sets/{id}` with track references resolved.
    pub async fn get_set(&self, id: DbId) -> Result<SetWithTracks, ClientError> {
        let response = self.client.get(self.url(&format!("/sets/{id}"))).send().await?;
        Self::parse_data(response).await
    }

    pub async fn create_set(&self, input: &CreateSet) -> Result<SetWithTracks, ClientError> {
        let response = self.client.post(self.url("/sets")).json(input).send().await?;
        Self::parse_data(response).await
    }

    pub async fn update_set(&self, id: DbId, input: &UpdateSet) -> Result<SetWithTracks, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/sets/{id}")))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn delete_set(&self, id: DbId) -> Result<Deleted, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/sets/{id}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn add_track_to_set(
        &self,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<SetWithTracks, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/sets/{set_id}/tracks")))
            .json(&AddSetTrack { track_id })
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn remove_track_from_set(
        &self,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<SetWithTracks, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/sets/{set_id}/tracks/{track_id}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn reorder_set_tracks(
        &self,
        set_id: DbId,
        track_ids: Vec<DbId>,
    ) -> Result<SetWithTracks, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/sets/{set_id}/reorder")))
            .json(&ReorderSetTracks { track_ids })
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------

    pub async fn key_options(&self) -> Result<Vec<KeyChoice>, ClientError> {
        let response = self.client.get(self.url("/meta/keys")).send().await?;
        Self::parse_data(response).await
    }

    pub async fn genres(&self) -> Result<Vec<String>, ClientError> {
        let response = self.client.get(self.url("/meta/genres")).send().await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    /// Unwrap the data envelope of a success response, or turn an error
    /// response into [`ClientError::Api`].
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => (parsed.code, parsed.error),
                Err(_) => (String::new(), body),
            };
            tracing::debug!(status = status.as_u16(), %code, %message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}
