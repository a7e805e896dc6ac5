//! HTTP-backed gateway over an abstract client.
//!
//! The actual HTTP client is abstracted via [`HttpClient`] so tests
//! can route requests to an in-process server and production code can
//! plug in [`crate::ReqwestClient`] (or any other implementation).

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::RemoteGateway;
use chrono::Utc;
use pdfsync_model::{remote, DocumentFile, DocumentRecord};
use std::time::Duration;

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the remote store, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Bounded per-request timeout.
    pub timeout: Duration,
    /// Optional bearer token attached to every request.
    pub auth_token: Option<String>,
}

impl GatewayConfig {
    /// Creates a configuration with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(10),
            auth_token: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// An HTTP response reduced to what the gateway needs.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A multipart upload: the file part plus its metadata fields.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    /// Filename sent with the file part.
    pub file_name: String,
    /// File content.
    pub bytes: Vec<u8>,
    /// Text fields, in order.
    pub fields: Vec<(&'static str, String)>,
}

/// Minimal HTTP client abstraction.
///
/// Implement this to back the gateway with a different HTTP library
/// or an in-process test server. Errors are plain strings; the
/// gateway wraps them into [`GatewayError`].
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<HttpResponse, String>;

    /// Sends a POST request with a multipart form body.
    fn post_multipart(&self, url: &str, upload: MultipartUpload) -> Result<HttpResponse, String>;

    /// Sends a DELETE request.
    fn delete(&self, url: &str) -> Result<HttpResponse, String>;
}

/// Gateway mapping the remote document endpoints onto an
/// [`HttpClient`].
pub struct HttpGateway<C: HttpClient> {
    config: GatewayConfig,
    client: C,
}

impl<C: HttpClient> HttpGateway<C> {
    /// Creates a gateway over the given client.
    pub fn new(config: GatewayConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

impl<C: HttpClient> RemoteGateway for HttpGateway<C> {
    /// Fetches the listing, degrading every failure to an empty set.
    ///
    /// 404 means the endpoint does not exist yet; 403 means an
    /// edge/IP filter blocked the caller. Both, along with transport
    /// errors and undecodable payloads, collapse to local-only
    /// operation rather than failing the sync pass.
    fn list(&self) -> GatewayResult<Vec<DocumentRecord>> {
        let url = self.url("/api/documents");
        let response = match self.client.get(&url) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "remote listing unreachable, degrading to empty");
                return Ok(Vec::new());
            }
        };

        match response.status {
            404 => {
                tracing::info!("remote listing endpoint absent, local-only mode");
                Ok(Vec::new())
            }
            403 => {
                tracing::warn!("remote listing returned 403, likely edge filtering");
                Ok(Vec::new())
            }
            _ if response.is_success() => Ok(remote::decode_listing(&response.body, Utc::now())),
            status => {
                tracing::warn!(status, "remote listing failed, degrading to empty");
                Ok(Vec::new())
            }
        }
    }

    fn upload(&self, file: &DocumentFile, record: &DocumentRecord) -> GatewayResult<()> {
        let mut fields: Vec<(&'static str, String)> = vec![
            ("id", record.id.clone()),
            ("name", record.display_name.clone()),
        ];
        for (key, tag) in ["tag1", "tag2", "tag3"].into_iter().zip(record.tags.iter()) {
            fields.push((key, tag.clone()));
        }
        if let Some(description) = &record.description {
            fields.push(("description", description.clone()));
        }

        let upload = MultipartUpload {
            file_name: file.file_name.clone(),
            bytes: file.bytes.to_vec(),
            fields,
        };

        let url = self.url("/api/documents/upload");
        let response = self
            .client
            .post_multipart(&url, upload)
            .map_err(GatewayError::transport)?;

        match response.status {
            404 => {
                tracing::info!("upload endpoint absent, keeping document local-only");
                Ok(())
            }
            _ if response.is_success() => Ok(()),
            status => Err(GatewayError::Status {
                operation: "upload",
                status,
            }),
        }
    }

    fn remove(&self, id: &str) -> GatewayResult<()> {
        let url = self.url(&format!("/api/documents/{id}"));
        let response = self.client.delete(&url).map_err(GatewayError::transport)?;

        match response.status {
            404 => {
                tracing::info!(id, "delete endpoint or document absent remotely");
                Ok(())
            }
            _ if response.is_success() => Ok(()),
            status => Err(GatewayError::Status {
                operation: "delete",
                status,
            }),
        }
    }
}
