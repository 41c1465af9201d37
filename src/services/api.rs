// src/services/api.rs

//! The single client for the student records API.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::services::{AchievementsClient, ReportClient, StudentDirectory};
use crate::utils::http::{HttpTransport, Payload, Transport, TransportResponse};
use crate::utils::{join_segments, parse_base_url};

/// Base URL plus transport, shared by every endpoint-specific client.
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client talking HTTP to `config.base_url`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(&config.base_url, Arc::new(transport))
    }

    /// Create a client over any transport.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL for the given path segments.
    pub fn url(&self, segments: &[&str]) -> Url {
        join_segments(&self.base_url, segments)
    }

    pub fn reports(&self) -> ReportClient {
        ReportClient::new(self.clone())
    }

    pub fn students(&self) -> StudentDirectory {
        StudentDirectory::new(self.clone())
    }

    pub fn achievements(&self) -> AchievementsClient {
        AchievementsClient::new(self.clone())
    }

    pub(crate) async fn get(&self, url: &Url) -> Result<TransportResponse> {
        self.transport.get(url).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<TransportResponse> {
        let body = serde_json::to_value(body)?;
        self.transport.post_json(url, &body).await
    }

    /// GET a JSON resource, mapping non-success statuses to [`AppError::Server`].
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &Url, fallback: &str) -> Result<T> {
        let response = self.get(url).await?;
        Self::decode(response, url, fallback)
    }

    /// POST a JSON body and decode the JSON answer.
    pub(crate) async fn post_json<B, T>(&self, url: &Url, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(url, body).await?;
        Self::decode(response, url, fallback)
    }

    fn decode<T: DeserializeOwned>(response: TransportResponse, url: &Url, fallback: &str) -> Result<T> {
        let response = ensure_success(response, fallback)?;
        match response.payload {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            other => Err(AppError::response(
                url.path(),
                format!(
                    "expected JSON, got {} ({} bytes)",
                    response.content_type.as_deref().unwrap_or("no content type"),
                    other.len()
                ),
            )),
        }
    }
}

/// Pass successful responses through; turn the rest into server errors.
///
/// The message comes from the body's `error`/`message` field when present,
/// otherwise `fallback`.
pub(crate) fn ensure_success(response: TransportResponse, fallback: &str) -> Result<TransportResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let message = response
        .error_message()
        .unwrap_or_else(|| fallback.to_string());
    Err(AppError::server(response.status, message))
}
