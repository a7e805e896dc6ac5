//! Concrete HTTP client backed by `reqwest`.

use crate::error::{GatewayError, GatewayResult};
use crate::http::{GatewayConfig, HttpClient, HttpResponse, MultipartUpload};
use pdfsync_model::DOCUMENT_MIME_TYPE;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};

/// Blocking HTTP client with a bounded timeout and optional bearer
/// token.
///
/// The timeout covers the whole request; the gateway imposes no retry
/// loop on top of it.
pub struct ReqwestClient {
    inner: Client,
    auth_token: Option<String>,
}

impl ReqwestClient {
    /// Builds a client from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns a non-retryable transport error if the underlying
    /// client cannot be constructed.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let inner = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport {
                message: err.to_string(),
                retryable: false,
            })?;

        Ok(Self {
            inner,
            auth_token: config.auth_token.clone(),
        })
    }

    fn send(&self, request: RequestBuilder) -> Result<HttpResponse, String> {
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().map_err(|err| err.to_string())?;
        Self::reduce(response)
    }

    fn reduce(response: Response) -> Result<HttpResponse, String> {
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|err| err.to_string())?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        self.send(self.inner.get(url))
    }

    fn post_multipart(&self, url: &str, upload: MultipartUpload) -> Result<HttpResponse, String> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(DOCUMENT_MIME_TYPE)
            .map_err(|err| err.to_string())?;

        let mut form = Form::new().part("file", part);
        for (key, value) in upload.fields {
            form = form.text(key, value);
        }

        self.send(self.inner.post(url).multipart(form))
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, String> {
        self.send(self.inner.delete(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builds_from_config() {
        let config = GatewayConfig::new("https://api.example.com")
            .with_timeout(Duration::from_secs(3))
            .with_auth_token("jwt");
        let client = ReqwestClient::new(&config).unwrap();
        assert_eq!(client.auth_token.as_deref(), Some("jwt"));
    }
}
