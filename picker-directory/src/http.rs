//! HTTP directory client.
//!
//! Talks to the directory HTTP API:
//! - `GET {base}/{users_path}?uids=[...]`: batch lookup, JSON array of records
//! - `GET {base}/{users_path}/{id}`: single record, 404 when absent
//! - `GET {base}/{users_path}/search?q=&exclude=[...]&skip=&limit=`:
//!   `{"results": [{"id", "text"}]}`

use crate::directory::{EntityDirectory, SearchQuery};
use crate::error::{DirectoryError, DirectoryResult};
use async_trait::async_trait;
use picker_types::{Entity, EntityId, SearchHit};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpDirectoryConfig {
    /// Base URL of the API (e.g. `https://example.com/api/2`).
    pub base_url: String,
    /// Path of the users collection, relative to `base_url`.
    pub users_path: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Bearer token sent with every request, if any.
    pub auth_token: Option<String>,
}

impl Default for HttpDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4080/api".to_string(),
            users_path: "auth/users".to_string(),
            timeout_secs: 30,
            auth_token: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

/// Directory backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    config: HttpDirectoryConfig,
    client: Client,
}

impl HttpDirectory {
    /// Creates a client for the configured API.
    pub fn new(config: HttpDirectoryConfig) -> DirectoryResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(DirectoryError::Config("base_url is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DirectoryError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpDirectoryConfig {
        &self.config
    }

    fn users_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.users_path.trim_matches('/')
        )
    }

    async fn get(&self, url: String, query: &[(&str, String)]) -> DirectoryResult<Response> {
        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(|e| DirectoryError::Network(format!("GET {url} failed: {e}")))
    }

    async fn error_for_status(response: Response) -> DirectoryError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        DirectoryError::Http { status, message }
    }
}

#[async_trait]
impl EntityDirectory for HttpDirectory {
    async fn lookup_by_ids(&self, ids: &[EntityId]) -> DirectoryResult<Vec<Entity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uids = serde_json::to_string(ids)?;
        debug!("Directory batch lookup of {} ids", ids.len());
        let response = self.get(self.users_url(), &[("uids", uids)]).await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response
            .json::<Vec<Entity>>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(format!("failed to parse users: {e}")))
    }

    async fn lookup_by_id(&self, id: &EntityId) -> DirectoryResult<Option<Entity>> {
        let url = format!("{}/{}", self.users_url(), urlencoding::encode(id.as_str()));
        let response = self.get(url, &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Directory has no entity {}", id);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let entity: Entity = response
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(format!("failed to parse user: {e}")))?;

        if &entity.id != id {
            warn!("Directory answered lookup of {} with {}", id, entity.id);
            return Err(DirectoryError::InvalidResponse(format!(
                "requested {id}, received {}",
                entity.id
            )));
        }
        Ok(Some(entity))
    }

    async fn search(&self, query: &SearchQuery) -> DirectoryResult<Vec<SearchHit>> {
        let exclude = serde_json::to_string(&query.exclude)?;
        let params = [
            ("q", query.text.clone()),
            ("exclude", exclude),
            ("skip", query.skip.to_string()),
            ("limit", query.effective_limit().to_string()),
        ];
        let response = self
            .get(format!("{}/search", self.users_url()), &params)
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            DirectoryError::InvalidResponse(format!("failed to parse search results: {e}"))
        })?;

        // Exclusion holds even when the server ignores `exclude`.
        Ok(body
            .results
            .into_iter()
            .filter(|hit| !query.is_excluded(&hit.id))
            .collect())
    }
}
