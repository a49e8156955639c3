use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ArtistId,
    protocol::{Artist, ArtistDraft, ArtistPage, ListArtistsQuery},
};
use tracing::{debug, warn};

pub mod error;
mod slug;

pub use error::ClientError;
pub use slug::generate_id_string;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote artist catalogue. `list_artists` is the paginated listing the
/// admin screen is built around; the rest back the create/edit dialogs.
#[async_trait]
pub trait ArtistsApi: Send + Sync {
    async fn list_artists(&self, query: &ListArtistsQuery) -> Result<ArtistPage, ClientError>;
    async fn get_artist(&self, id: ArtistId) -> Result<Artist, ClientError>;
    async fn create_artist(&self, draft: &ArtistDraft) -> Result<Artist, ClientError>;
    async fn update_artist(&self, id: ArtistId, draft: &ArtistDraft)
        -> Result<Artist, ClientError>;
}

#[derive(Clone)]
pub struct HttpArtistsClient {
    http: Client,
    base_url: String,
}

impl HttpArtistsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        // The status is still reported when its body cannot be read.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(%status, error = %err, "failed to read error response body");
                String::new()
            }
        };
        let err = ClientError::from_status(status, &body);
        warn!(%status, error = %err, "artists service returned non-success status");
        return Err(err);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl ArtistsApi for HttpArtistsClient {
    async fn list_artists(&self, query: &ListArtistsQuery) -> Result<ArtistPage, ClientError> {
        debug!(search = ?query.search, page = query.page, "GET /artists");
        let response = self
            .http
            .get(self.url("artists"))
            .query(query)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Artist, ClientError> {
        let response = self.http.get(self.url(&format!("artists/{id}"))).send().await?;
        decode_json(response).await
    }

    async fn create_artist(&self, draft: &ArtistDraft) -> Result<Artist, ClientError> {
        let response = self
            .http
            .post(self.url("artists"))
            .json(draft)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn update_artist(
        &self,
        id: ArtistId,
        draft: &ArtistDraft,
    ) -> Result<Artist, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("artists/{id}")))
            .json(draft)
            .send()
            .await?;
        decode_json(response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
