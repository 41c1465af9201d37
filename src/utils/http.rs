// src/utils/http.rs

//! HTTP transport.
//!
//! Responses are classified once, here, by their declared `Content-Type`
//! into a [`Payload`]. Callers never guess the body shape by trying to parse it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;

/// Response body, tagged by the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Any non-JSON, non-text body (PDF, XLSX, ZIP, ...)
    Binary(Vec<u8>),
    /// `application/json` body that parsed
    Json(Value),
    /// `text/*` body, or a JSON-declared body that failed to parse
    Text(String),
}

impl Payload {
    /// Classify raw bytes according to a `Content-Type` header value.
    pub fn classify(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if mime == "application/json" || mime.ends_with("+json") {
            match serde_json::from_slice(&bytes) {
                Ok(value) => Payload::Json(value),
                Err(_) => Payload::Text(String::from_utf8_lossy(&bytes).into_owned()),
            }
        } else if mime.starts_with("text/") {
            Payload::Text(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            Payload::Binary(bytes)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Binary(bytes) => bytes.len(),
            Payload::Json(value) => value.to_string().len(),
            Payload::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A response as seen by the API clients.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub payload: Payload,
}

impl TransportResponse {
    /// Build a response, classifying the body by `content_type`.
    pub fn new(
        status: u16,
        content_type: Option<String>,
        content_disposition: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        let payload = Payload::classify(content_type.as_deref(), body);
        Self {
            status,
            content_type,
            content_disposition,
            payload,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable message from a structured error body.
    ///
    /// Looks at `error`, then `message`. Anything else, including a body that
    /// was declared JSON but did not parse, yields `None`.
    pub fn error_message(&self) -> Option<String> {
        let Payload::Json(value) = &self.payload else {
            return None;
        };
        ["error", "message"]
            .iter()
            .filter_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_string)
    }
}

/// Request/response seam between the API clients and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &Url) -> Result<TransportResponse>;

    /// Issue a POST request with a JSON body.
    async fn post_json(&self, url: &Url, body: &Value) -> Result<TransportResponse>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);
        let body = response.bytes().await?.to_vec();

        log::debug!(
            "Response {} ({} bytes, {})",
            status,
            body.len(),
            content_type.as_deref().unwrap_or("no content type")
        );

        Ok(TransportResponse::new(
            status,
            content_type,
            content_disposition,
            body,
        ))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<TransportResponse> {
        log::debug!("POST {}", url);
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read(response).await
    }
}
