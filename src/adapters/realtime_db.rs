use crate::domain::model::{
    collection_from_snapshot, favorites_from_snapshot, FavoriteSet, Nanny, Session,
};
use crate::domain::ports::{FavoritesStore, NannySource};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Client for the hosted real-time database's REST surface
/// (`<base>/<path>.json`, optional `?auth=<id token>`).
#[derive(Debug, Clone)]
pub struct RealtimeDbClient {
    base_url: String,
    client: Client,
    read_token: Option<String>,
    timeout: Option<Duration>,
}

impl RealtimeDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            read_token: None,
            timeout: None,
        }
    }

    /// Token used for reads that are not tied to a session.
    pub fn with_read_token(mut self, token: Option<String>) -> Self {
        self.read_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `<base>/<segments...>.json`, each segment percent-encoded so an id
    /// can never reach another node.
    fn node_url(&self, segments: &[&str]) -> Result<Url> {
        let invalid = |reason: &str| DirectoryError::InvalidConfigValueError {
            field: "database_url".to_string(),
            value: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        if let Some((last, parents)) = segments.split_last() {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot carry a path"))?;
            path.pop_if_empty().extend(parents).push(&format!("{}.json", last));
        }
        Ok(url)
    }

    fn prepare(&self, mut request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        if let Some(token) = token {
            request = request.query(&[("auth", token)]);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn get_node(&self, segments: &[&str], token: Option<&str>) -> Result<Value> {
        let url = self.node_url(segments)?;
        tracing::debug!("GET {}", url);
        let response = self.prepare(self.client.get(url), token).send().await?;

        let status = response.status();
        tracing::debug!("Database response status: {}", status);
        if !status.is_success() {
            return Err(DirectoryError::ApiStatusError {
                status: status.as_u16(),
                path: segments.join("/"),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl NannySource for RealtimeDbClient {
    async fn fetch_nannies(&self) -> Result<Vec<Nanny>> {
        let node = self.get_node(&["nannies"], self.read_token.as_deref()).await?;
        let nannies = collection_from_snapshot(&node);
        tracing::info!("Fetched {} nannies from {}", nannies.len(), self.base_url);
        Ok(nannies)
    }
}

#[async_trait]
impl FavoritesStore for RealtimeDbClient {
    async fn favorite_ids(&self, session: &Session) -> Result<FavoriteSet> {
        let segments = ["users", session.uid.as_str(), "favorites"];
        let node = self.get_node(&segments, session.id_token.as_deref()).await?;
        Ok(favorites_from_snapshot(&node))
    }

    async fn set_favorite(&self, session: &Session, nanny_id: &str, favorite: bool) -> Result<()> {
        let segments = ["users", session.uid.as_str(), "favorites", nanny_id];
        let url = self.node_url(&segments)?;

        // Unmarking deletes the key instead of storing `false`.
        let request = if favorite {
            self.client.put(url).json(&Value::Bool(true))
        } else {
            self.client.delete(url)
        };

        let response = self
            .prepare(request, session.id_token.as_deref())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::ApiStatusError {
                status: status.as_u16(),
                path: segments.join("/"),
            });
        }
        Ok(())
    }
}
