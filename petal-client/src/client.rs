//! The control-plane API client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    BackupList, BackupModel, CollectionList, CollectionModel, ConfigureIndexRequest,
    DeletionProtection, IndexList, IndexModel,
};

/// Client for the Petal management API.
///
/// Covers the control-plane operations the cleanup tooling needs; the
/// data-plane (vector reads and writes) is out of scope here.
pub struct ControlPlaneClient {
    http: Client,
    config: ClientConfig,
}

impl ControlPlaneClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        self.http
            .request(method, url)
            .header("Api-Key", &self.config.api_key)
            .header("Accept", "application/json")
    }

    /// Send a request, retrying transient failures (429, 5xx, transport
    /// errors) per the configured policy. 4xx responses, including 404,
    /// never retry.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let policy = &self.config.retry;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let mut request = self.request(method.clone(), path);
            if let Some(body) = &body {
                request = request.json(body);
            }
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(ClientError::NotFound {
                            path: path.to_string(),
                        });
                    }
                    let retryable =
                        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
                    if retryable && attempt < policy.max_attempts {
                        let delay = policy.delay_for(attempt - 1);
                        debug!(%status, attempt, ?delay, path, "transient API failure, backing off");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    let message = Self::error_message(response).await;
                    return Err(ClientError::Api {
                        status: status.as_u16(),
                        message,
                    });
                }
                Err(err) => {
                    let retryable = err.is_timeout() || err.is_connect() || err.is_request();
                    if retryable && attempt < policy.max_attempts {
                        let delay = policy.delay_for(attempt - 1);
                        warn!(error = %err, attempt, ?delay, path, "request failed, backing off");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(ClientError::Http(err));
                }
            }
        }
    }

    /// Error bodies look like `{"error": {"code": ..., "message": ...}}`,
    /// but the shape is not guaranteed; fall back to the raw body.
    async fn error_message(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
                .unwrap_or(text),
            Err(_) => text,
        }
    }

    // Indexes

    pub async fn list_indexes(&self) -> Result<Vec<IndexModel>, ClientError> {
        let response = self.send(Method::GET, "/indexes", None).await?;
        let list: IndexList = response.json().await?;
        Ok(list.indexes)
    }

    pub async fn describe_index(&self, name: &str) -> Result<IndexModel, ClientError> {
        let response = self
            .send(Method::GET, &format!("/indexes/{name}"), None)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn configure_index(
        &self,
        name: &str,
        deletion_protection: DeletionProtection,
    ) -> Result<IndexModel, ClientError> {
        let body = serde_json::to_value(ConfigureIndexRequest {
            deletion_protection,
        })?;
        let response = self
            .send(Method::PATCH, &format!("/indexes/{name}"), Some(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_index(&self, name: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("/indexes/{name}"), None)
            .await?;
        Ok(())
    }

    // Collections

    pub async fn list_collections(&self) -> Result<Vec<CollectionModel>, ClientError> {
        let response = self.send(Method::GET, "/collections", None).await?;
        let list: CollectionList = response.json().await?;
        Ok(list.collections)
    }

    pub async fn describe_collection(&self, name: &str) -> Result<CollectionModel, ClientError> {
        let response = self
            .send(Method::GET, &format!("/collections/{name}"), None)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_collection(&self, name: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("/collections/{name}"), None)
            .await?;
        Ok(())
    }

    // Backups
    //
    // The API has no describe-by-name endpoint for backups; callers that
    // need a lookup by name must scan the list.

    pub async fn list_backups(&self) -> Result<Vec<BackupModel>, ClientError> {
        let response = self.send(Method::GET, "/backups", None).await?;
        let list: BackupList = response.json().await?;
        Ok(list.data)
    }

    pub async fn delete_backup(&self, backup_id: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("/backups/{backup_id}"), None)
            .await?;
        Ok(())
    }
}
