//! HTTP client for the event catalog API

use crate::models::{CreateEvent, Event};
use core_config::{ConfigError, env_required};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("Request to catalog failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type CatalogClientResult<T> = Result<T, CatalogClientError>;

/// Consumer of the catalog API.
///
/// Every non-success status is an error, including 404 from an empty list.
/// No retries and no caching.
#[derive(Clone, Debug)]
pub struct EventCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl EventCatalogClient {
    /// `base_url` is the service root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Build from the required `CATALOG_API_URL` variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("CATALOG_API_URL")?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn events_url(&self) -> String {
        format!("{}/api/event", self.base_url)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> CatalogClientResult<Vec<Event>> {
        let response = self.http.get(self.events_url()).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_event_by_id(&self, id: Uuid) -> CatalogClientResult<Event> {
        let url = format!("{}/{}", self.events_url(), id);
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self, request), fields(event_name = %request.name))]
    pub async fn create_event(&self, request: &CreateEvent) -> CatalogClientResult<Event> {
        let response = self
            .http
            .post(self.events_url())
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> CatalogClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, "Catalog request failed");
        return Err(CatalogClientError::Status { status, body });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = EventCatalogClient::new("http://catalog:8080/");
        assert_eq!(client.base_url(), "http://catalog:8080");
        assert_eq!(client.events_url(), "http://catalog:8080/api/event");
    }

    #[test]
    fn test_from_env_requires_url() {
        temp_env::with_var_unset("CATALOG_API_URL", || {
            assert!(EventCatalogClient::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env_reads_url() {
        temp_env::with_var("CATALOG_API_URL", Some("http://catalog:9000"), || {
            let client = EventCatalogClient::from_env().unwrap();
            assert_eq!(client.base_url(), "http://catalog:9000");
        });
    }
}
